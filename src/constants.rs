/// DOM and page-level constants for the browser front-end.
// Canvas the indicator draws into
pub const CANVAS_ID: &str = "c";

// Device pixel ratio ceiling; higher ratios cost fill rate with no visible gain
pub const DPR_MAX: f64 = 2.0;

// Name of the control object installed on `window`
pub const API_GLOBAL: &str = "KEHAI";
