pub mod builder;
pub mod meta;
mod normalizer;
pub mod types;

pub use builder::{SeriesBuilder, group_and_prepare};
pub use meta::{aggregate, small_multiple_domain, visible_range};
pub use normalizer::normalize;
pub use types::{BusinessSeries, MetaDataset, NormalizedSeries, SeriesMap, VisibleRange};
