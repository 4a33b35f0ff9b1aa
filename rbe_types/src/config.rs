use std::fmt;

/// Which of the two wire layouts a stream carries.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum Format {
    /// Dictionary keys inline as strings.
    Plain,
    /// A key table up front; dictionary keys as indices into it.
    #[default]
    Packed,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Plain => write!(f, "plain"),
            Format::Packed => write!(f, "packed"),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct CodecConfig {
    pub format: Format,
    /// Capacity of the `BufReader`/`BufWriter` wrapped around the caller's stream.
    pub buffer_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl CodecConfig {
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }
}

pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;
