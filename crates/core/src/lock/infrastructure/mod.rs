pub mod command_lock_actuator;
