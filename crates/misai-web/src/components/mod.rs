//! Reusable components

mod error_banner;
mod fact_check;
mod footer;
mod media_report;
mod nav;
mod score_meter;
mod text_report;

pub use error_banner::FailureBanner;
pub use fact_check::FactCheckView;
pub use footer::Footer;
pub use media_report::MediaReportView;
pub use nav::Nav;
pub use score_meter::ScoreMeter;
pub use text_report::TextReportView;
