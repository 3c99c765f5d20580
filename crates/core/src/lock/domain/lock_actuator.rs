/// Fires the external session-lock action.
///
/// Must not block the monitor loop: implementations start the lock action
/// and return. An `Err` means the action could not be started; the session
/// logs it and keeps polling.
pub trait LockActuator: Send {
    fn trigger_lock(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
