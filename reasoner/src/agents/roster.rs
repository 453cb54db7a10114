//! The fixed four-role roster, in execution order.

use crate::core::types::AgentSpec;
use crate::io::prompt::{
    CRITICAL_REVIEWER_ROLE, DOMAIN_EXPERT_ROLE, FINAL_POLISHER_ROLE, INITIAL_SOLVER_ROLE,
};

pub const INITIAL_SOLVER: &str = "initial-solver";
pub const CRITICAL_REVIEWER: &str = "critical-reviewer";
pub const DOMAIN_EXPERT: &str = "domain-expert";
pub const FINAL_POLISHER: &str = "final-polisher";

/// Initial solver, critical reviewer, domain-expert refiner, final polisher.
pub fn standard_roster() -> Vec<AgentSpec> {
    vec![
        AgentSpec::new(INITIAL_SOLVER, INITIAL_SOLVER_ROLE),
        AgentSpec::new(CRITICAL_REVIEWER, CRITICAL_REVIEWER_ROLE),
        AgentSpec::new(DOMAIN_EXPERT, DOMAIN_EXPERT_ROLE),
        AgentSpec::new(FINAL_POLISHER, FINAL_POLISHER_ROLE),
    ]
}
