//! Presentation of report summaries: JSON text or a bar chart image.
pub mod chart;
pub mod text;
