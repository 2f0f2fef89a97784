//! Column-name contract for the two survey schemas.
//!
//! The mental-health and career surveys share `country` and `age`;
//! everything else is dataset-specific. `age_group` is derived, never
//! loaded.

pub const COUNTRY: &str = "country";
pub const AGE: &str = "age";
pub const AGE_GROUP: &str = "age_group";

// Mental-health survey
pub const GENDER: &str = "gender";
pub const TREATMENT: &str = "treatment";
pub const WORK_INTERFERE: &str = "work_interfere";
pub const FAMILY_HISTORY: &str = "family_history";
pub const NO_EMPLOYEES: &str = "no_employees";
pub const REMOTE_WORK: &str = "remote_work";
pub const TECH_COMPANY: &str = "tech_company";
pub const MENTAL_HEALTH_CONSEQUENCE: &str = "mental_health_consequence";
pub const BENEFITS: &str = "benefits";
pub const CARE_OPTIONS: &str = "care_options";

// Career survey
pub const EMPLOYMENT: &str = "employment";
pub const DEV_TYPE: &str = "dev_type";
pub const JOB_SATISFACTION: &str = "job_satisfaction";
pub const MENTAL_HEALTH: &str = "mental_health";
pub const COMPENSATION: &str = "compensation";
pub const UNDERGRAD_MAJOR: &str = "undergrad_major";
