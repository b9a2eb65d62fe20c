//! Charts and word clouds rendered as SVG

pub mod charts;
pub mod wordcloud;

pub use charts::{BarChart, ChartPanel, INSUFFICIENT_DATA};
pub use wordcloud::{WordCloud, WordCloudLayout};
