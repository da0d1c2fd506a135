pub mod config;
pub mod encode;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod sample;
pub mod series;
pub mod timestamp;

pub use encode::ExportFormat;
pub use sample::{Payload, RawEntry, RawGroup, Sample};
pub use series::{ChartData, Series};
