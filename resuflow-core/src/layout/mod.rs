mod engine;
pub mod geometry;
mod measure;
mod page;

pub use engine::{LayoutEngine, TextAlign, TextOptions};
pub use geometry::{Margins, PageGeometry, Spacing, TextStyle, Typography};
pub use measure::{FontMetricsMeasurer, TextMeasurer};
pub use page::{PageContent, RuleLine, TextRun};
