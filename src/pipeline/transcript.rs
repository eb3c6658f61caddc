/// Ordered list of transcribed fragments for one session.
///
/// Fragments are stored in segment order; the live view and the final
/// document are both the fragments joined with single spaces.
#[derive(Debug, Default)]
pub struct Transcript {
    fragments: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment. Callers trim and filter empties first.
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn joined(&self) -> String {
        self.fragments.join(" ")
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
