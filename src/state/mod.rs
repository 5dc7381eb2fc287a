pub mod tooltip;

pub use tooltip::TooltipState;
