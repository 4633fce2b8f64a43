//! Charts module - Labor force pie chart layout

mod pie;

pub use pie::{polar, ChartPresenter, PieChart};
