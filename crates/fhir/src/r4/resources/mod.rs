mod appointment;
mod bundle;
mod measure;
mod observation;
mod patient;
mod search_parameter;
mod test_report;

pub use appointment::*;
pub use bundle::*;
pub use measure::*;
pub use observation::*;
pub use patient::*;
pub use search_parameter::*;
pub use test_report::*;
