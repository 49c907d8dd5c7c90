//! Session context and the end-to-end state machine.
//!
//! `Disconnected → Connecting → Connected → (Refreshing | Transferring) →
//! Connected`, with `Connecting` able to fail back to `Disconnected` at the
//! provider, chain or account step. The session is passed explicitly to each
//! operation; there is no module-level state.

use alloy::primitives::Address;
use tokendeck_error::{Result, TokendeckError};

/// Where the user flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No wallet connection
    Disconnected,
    /// Connect sequence in flight
    Connecting,
    /// Wallet connected, idle
    Connected,
    /// Balance/history refresh in flight
    Refreshing,
    /// Transfer submission in flight
    Transferring,
}

/// An exclusive action a connected session can run. One at a time; starting
/// a second while one is in flight is rejected rather than raced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Balance and history refresh
    Refresh,
    /// Transfer submission
    Transfer,
}

impl Action {
    fn state(self) -> SessionState {
        match self {
            Action::Refresh => SessionState::Refreshing,
            Action::Transfer => SessionState::Transferring,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Action::Refresh => "refresh",
            Action::Transfer => "transfer",
        }
    }
}

/// The session context: connected account plus flow state. Cleared back to
/// [`SessionState::Disconnected`] when a connect attempt fails.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    account: Option<Address>,
}

impl Session {
    /// A fresh, disconnected session.
    pub fn new() -> Self {
        Self {
            state: SessionState::Disconnected,
            account: None,
        }
    }

    /// Current flow state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True once a wallet connection succeeded and no connect is in flight.
    pub fn is_connected(&self) -> bool {
        matches!(
            self.state,
            SessionState::Connected | SessionState::Refreshing | SessionState::Transferring
        )
    }

    /// The connected account, or [`TokendeckError::NotConnected`].
    pub fn account(&self) -> Result<Address> {
        self.account
            .ok_or_else(|| TokendeckError::NotConnected("no account connected".to_string()))
    }

    /// Starts the connect sequence. Allowed from `Disconnected` and, for a
    /// reconnect after a wallet-side account change, from `Connected`.
    pub fn begin_connect(&mut self) -> Result<()> {
        match self.state {
            SessionState::Disconnected | SessionState::Connected => {
                self.state = SessionState::Connecting;
                Ok(())
            }
            SessionState::Connecting => Err(TokendeckError::ActionInFlight {
                action: "connect".to_string(),
            }),
            SessionState::Refreshing | SessionState::Transferring => {
                Err(TokendeckError::ActionInFlight {
                    action: self.state_action_name().to_string(),
                })
            }
        }
    }

    /// Marks the connect sequence failed; the session falls back to
    /// `Disconnected` and any previous account is cleared.
    pub fn connect_failed(&mut self) {
        self.state = SessionState::Disconnected;
        self.account = None;
    }

    /// Completes the connect sequence with the wallet's account.
    pub fn connected(&mut self, account: Address) {
        self.state = SessionState::Connected;
        self.account = Some(account);
    }

    /// Begins an exclusive action. Errors when not connected or when any
    /// action is already in flight.
    pub fn begin_action(&mut self, action: Action) -> Result<()> {
        match self.state {
            SessionState::Connected => {
                self.state = action.state();
                Ok(())
            }
            SessionState::Disconnected => Err(TokendeckError::NotConnected(
                "connect a wallet before running actions".to_string(),
            )),
            _ => Err(TokendeckError::ActionInFlight {
                action: self.state_action_name().to_string(),
            }),
        }
    }

    /// Ends the in-flight action, returning to `Connected`.
    pub fn finish_action(&mut self) {
        if matches!(
            self.state,
            SessionState::Refreshing | SessionState::Transferring
        ) {
            self.state = SessionState::Connected;
        }
    }

    fn state_action_name(&self) -> &'static str {
        match self.state {
            SessionState::Connecting => "connect",
            SessionState::Refreshing => Action::Refresh.name(),
            SessionState::Transferring => Action::Transfer.name(),
            _ => "none",
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn test_account() -> Address {
        Address::from_str("0x742d35Cc6634C0532925a3b844Bc9e7595f5fFb9").unwrap()
    }

    #[test]
    fn test_starts_disconnected() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(!session.is_connected());
        assert!(session.account().is_err());
    }

    #[test]
    fn test_connect_happy_path() {
        let mut session = Session::new();
        session.begin_connect().unwrap();
        assert_eq!(session.state(), SessionState::Connecting);
        session.connected(test_account());
        assert!(session.is_connected());
        assert_eq!(session.account().unwrap(), test_account());
    }

    #[test]
    fn test_connect_failure_falls_back() {
        let mut session = Session::new();
        session.begin_connect().unwrap();
        session.connect_failed();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(session.account().is_err());
    }

    #[test]
    fn test_reconnect_from_connected() {
        let mut session = Session::new();
        session.begin_connect().unwrap();
        session.connected(test_account());
        // wallet-side account change: re-run the connect sequence
        session.begin_connect().unwrap();
        assert_eq!(session.state(), SessionState::Connecting);
    }

    #[test]
    fn test_actions_require_connection() {
        let mut session = Session::new();
        let err = session.begin_action(Action::Refresh).unwrap_err();
        assert!(matches!(err, TokendeckError::NotConnected(_)));
    }

    #[test]
    fn test_action_round_trip() {
        let mut session = Session::new();
        session.begin_connect().unwrap();
        session.connected(test_account());

        session.begin_action(Action::Refresh).unwrap();
        assert_eq!(session.state(), SessionState::Refreshing);
        session.finish_action();
        assert_eq!(session.state(), SessionState::Connected);

        session.begin_action(Action::Transfer).unwrap();
        assert_eq!(session.state(), SessionState::Transferring);
        session.finish_action();
        assert_eq!(session.state(), SessionState::Connected);
    }

    #[test]
    fn test_in_flight_guard_rejects_reentry() {
        let mut session = Session::new();
        session.begin_connect().unwrap();
        session.connected(test_account());
        session.begin_action(Action::Transfer).unwrap();

        let err = session.begin_action(Action::Transfer).unwrap_err();
        assert!(matches!(err, TokendeckError::ActionInFlight { .. }));
        let err = session.begin_action(Action::Refresh).unwrap_err();
        assert!(matches!(err, TokendeckError::ActionInFlight { .. }));
        let err = session.begin_connect().unwrap_err();
        assert!(matches!(err, TokendeckError::ActionInFlight { .. }));

        // the original action still completes normally
        session.finish_action();
        assert!(session.begin_action(Action::Refresh).is_ok());
    }

    #[test]
    fn test_double_connect_guarded() {
        let mut session = Session::new();
        session.begin_connect().unwrap();
        let err = session.begin_connect().unwrap_err();
        assert!(matches!(err, TokendeckError::ActionInFlight { .. }));
    }

    #[test]
    fn test_account_preserved_across_actions() {
        let mut session = Session::new();
        session.begin_connect().unwrap();
        session.connected(test_account());
        session.begin_action(Action::Refresh).unwrap();
        assert_eq!(session.account().unwrap(), test_account());
    }
}
