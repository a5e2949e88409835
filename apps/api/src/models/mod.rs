pub mod labels;
pub mod lenient;
pub mod locale;
pub mod portfolio;

pub use labels::UiLabels;
pub use locale::Locale;
pub use portfolio::PortfolioDocument;
