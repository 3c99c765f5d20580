pub mod lock_actuator;
