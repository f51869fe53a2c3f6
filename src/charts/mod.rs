pub mod builder;
pub mod figure;
pub mod histogram;
pub mod theme;

pub use builder::{BarChart, ChartBuilder};
pub use figure::{Datum, Figure};
pub use theme::{ChartTheme, Palette};
