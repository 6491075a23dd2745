//! Scenario tests spanning several subsystems
