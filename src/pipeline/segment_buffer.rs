/// Fixed-length slice of captured audio handed to the transcriber.
#[derive(Debug, Clone)]
pub struct Segment {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Segment {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Accumulates incoming chunks and cuts them into segments of exactly
/// `segment_samples` samples, in arrival order. Chunk boundaries are not
/// preserved; a segment may span several chunks and a chunk may feed
/// several segments. Whatever falls short of the threshold stays buffered.
#[derive(Debug)]
pub struct SegmentBuffer {
    samples: Vec<f32>,
    segment_samples: usize,
    sample_rate: u32,
}

impl SegmentBuffer {
    pub fn new(sample_rate: u32, segment_samples: usize) -> Self {
        Self {
            samples: Vec::new(),
            segment_samples,
            sample_rate,
        }
    }

    pub fn push(&mut self, chunk: &[f32]) {
        self.samples.extend_from_slice(chunk);
    }

    /// Takes the next full segment off the front of the buffer, if one is
    /// ready. Call in a loop: a single large chunk can complete several
    /// segments at once.
    pub fn pop_segment(&mut self) -> Option<Segment> {
        if self.samples.len() < self.segment_samples {
            return None;
        }
        let samples: Vec<f32> = self.samples.drain(..self.segment_samples).collect();
        Some(Segment::new(samples, self.sample_rate))
    }

    /// Takes the sub-threshold remainder, leaving the buffer empty.
    pub fn take_residue(&mut self) -> Option<Segment> {
        if self.samples.is_empty() {
            return None;
        }
        let samples = std::mem::take(&mut self.samples);
        Some(Segment::new(samples, self.sample_rate))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn segment_samples(&self) -> usize {
        self.segment_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(start: usize, len: usize) -> Vec<f32> {
        (start..start + len).map(|i| i as f32).collect()
    }

    #[test]
    fn below_threshold_yields_nothing() {
        let mut buffer = SegmentBuffer::new(16_000, 48_000);
        buffer.push(&ramp(0, 47_999));
        assert!(buffer.pop_segment().is_none());
        assert_eq!(buffer.len(), 47_999);
    }

    #[test]
    fn exact_threshold_yields_one_segment_and_empties() {
        let mut buffer = SegmentBuffer::new(16_000, 48_000);
        buffer.push(&ramp(0, 48_000));

        let segment = buffer.pop_segment().unwrap();
        assert_eq!(segment.len(), 48_000);
        assert_eq!(segment.sample_rate(), 16_000);
        assert!(!segment.is_empty());
        assert!(buffer.is_empty());
        assert!(buffer.pop_segment().is_none());
    }

    #[test]
    fn oversized_buffer_drains_in_order_and_keeps_residue() {
        let mut buffer = SegmentBuffer::new(16_000, 48_000);
        // 3.33s worth of audio: two pushes that straddle the boundary.
        buffer.push(&ramp(0, 30_000));
        buffer.push(&ramp(30_000, 23_333));

        let segment = buffer.pop_segment().unwrap();
        assert_eq!(segment.len(), 48_000);
        assert_eq!(segment.samples()[0], 0.0);
        assert_eq!(segment.samples()[47_999], 47_999.0);

        assert!(buffer.pop_segment().is_none());
        assert_eq!(buffer.len(), 5_333);
    }

    #[test]
    fn one_big_chunk_completes_consecutive_segments() {
        let mut buffer = SegmentBuffer::new(16_000, 48_000);
        buffer.push(&ramp(0, 100_000));

        let first = buffer.pop_segment().unwrap();
        let second = buffer.pop_segment().unwrap();
        assert!(buffer.pop_segment().is_none());

        // Disjoint and contiguous: second picks up where first ended.
        assert_eq!(first.samples()[47_999], 47_999.0);
        assert_eq!(second.samples()[0], 48_000.0);
        assert_eq!(second.samples()[47_999], 95_999.0);
        assert_eq!(buffer.len(), 4_000);
    }

    #[test]
    fn residue_is_taken_once() {
        let mut buffer = SegmentBuffer::new(16_000, 48_000);
        buffer.push(&ramp(0, 1_000));

        let residue = buffer.take_residue().unwrap();
        assert_eq!(residue.len(), 1_000);
        assert!((residue.duration_secs() - 0.0625).abs() < 1e-6);
        assert!(buffer.take_residue().is_none());
    }
}
