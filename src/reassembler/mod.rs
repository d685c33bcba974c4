//! Order-tolerant reassembly of fragment streams.
//!
//! - [`Reassembler`] - Accepts fragments in any order, writes them in order
//! - [`FragmentSink`] / [`DrainableSink`] - Sink capabilities
//! - [`MemorySink`], [`FileSink`], [`WriterSink`] - Concrete sinks

mod engine;
mod sink;

pub use engine::{Reassembler, Submission};
pub use sink::{DrainableSink, FileSink, FragmentSink, MemorySink, WriterSink};
