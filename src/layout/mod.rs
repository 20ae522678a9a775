pub mod figure;
pub mod table;

pub use figure::{group_figure_rows, resolve_figures, FigureRow, ResolvedFigure, TempImages};
pub use table::{layout_table, GridDescription};
