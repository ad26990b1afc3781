//! Data models for the dashboard.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "15s", "500ms")
//! - [`status`]: The four status categories ([`HealthView`]) and color mapping
//! - [`window`]: Sliding window of CPU-load samples ([`LoadWindow`], [`Sample`])
//! - [`report`]: Serializable export of the current dashboard state
//!
//! ## Data Flow
//!
//! ```text
//! HealthPayload (raw JSON)
//!        │
//!        ├──▶ HealthView::from_payload()   (StatusSampler)
//!        │
//!        └──▶ LoadWindow::push(Sample)     (LoadSampler)
//! ```

pub mod duration;
pub mod report;
pub mod status;
pub mod window;

pub use report::HealthReport;
pub use status::{cpu_level, status_color, HealthView, StatusCategory, StatusColor};
pub use window::{LoadWindow, Sample};
