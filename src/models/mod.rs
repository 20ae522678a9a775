pub mod options;
pub mod section;

pub use options::{FontSpec, Margins, ReportOptions, UserFont, UserMargins, UserOptions};
pub use section::{FigureSource, FigureSpec, PlaceholderPayload, Plottable, Section, TableSpec};
