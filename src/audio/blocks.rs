//! Assembles fixed-size mono analysis blocks from interleaved device buffers.

/// Average one interleaved frame down to a single mono sample
pub fn downmix_frame(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    frame.iter().sum::<f32>() / frame.len() as f32
}

/// Accumulates mono samples until a full block is available.
///
/// Device callbacks deliver buffers of arbitrary length; the analyzer needs
/// exactly `block_size` samples. The internal buffer is allocated once.
pub struct BlockAssembler {
    block_size: usize,
    channels: usize,
    buffer: Vec<f32>,
}

impl BlockAssembler {
    pub fn new(block_size: usize, channels: usize) -> Self {
        Self {
            block_size,
            channels: channels.max(1),
            buffer: Vec::with_capacity(block_size),
        }
    }

    /// Samples currently waiting for a block to fill
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed interleaved samples; `on_block` runs once per completed block.
    ///
    /// A trailing partial frame (fewer samples than channels) is dropped.
    pub fn push_interleaved<F>(&mut self, data: &[f32], mut on_block: F)
    where
        F: FnMut(&[f32]),
    {
        for frame in data.chunks_exact(self.channels) {
            self.buffer.push(downmix_frame(frame));

            if self.buffer.len() >= self.block_size {
                on_block(&self.buffer);
                self.buffer.clear();
            }
        }
    }
}
