use std::{cell::RefCell, rc::Rc};

use crate::api::{ApiClient, ApiError, LoginRequest, TokenStore, UserResponse};

/// Authentication state. A profile exists only while authorized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Idle,
    Loading,
    Authorized(UserResponse),
    Unauthorized,
}

impl Session {
    pub fn user(&self) -> Option<&UserResponse> {
        match self {
            Session::Authorized(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Session::Authorized(_))
    }

    /// True until the machine has settled on authorized or unauthorized.
    pub fn is_pending(&self) -> bool {
        matches!(self, Session::Idle | Session::Loading)
    }
}

type Observer = Rc<dyn Fn(&Session)>;

struct Machine {
    session: Session,
    epoch: u64,
    observers: Vec<Observer>,
}

/// Drives [`Session`] from the token store and the profile endpoint.
///
/// Each `start`/`login`/`logout` opens a new epoch; async results from an
/// older epoch are dropped.
#[derive(Clone)]
pub struct SessionController {
    client: ApiClient,
    tokens: TokenStore,
    machine: Rc<RefCell<Machine>>,
}

impl SessionController {
    pub fn new(client: ApiClient) -> Self {
        let tokens = client.token_store();
        Self {
            client,
            tokens,
            machine: Rc::new(RefCell::new(Machine {
                session: Session::Idle,
                epoch: 0,
                observers: Vec::new(),
            })),
        }
    }

    pub fn session(&self) -> Session {
        self.machine.borrow().session.clone()
    }

    pub fn subscribe(&self, observer: impl Fn(&Session) + 'static) {
        self.machine.borrow_mut().observers.push(Rc::new(observer));
    }

    /// Restores a persisted session. Without a token no request is made.
    pub async fn start(&self) {
        let epoch = self.begin();
        if self.tokens.get().is_none() {
            self.enter_unauthorized(epoch);
            return;
        }
        self.transition(epoch, Session::Loading);
        if let Err(err) = self.resolve_profile(epoch).await {
            log::info!("Stored session rejected: {}", err);
        }
    }

    /// Exchanges credentials, stores the token and loads the profile.
    /// Errors are returned for display next to the form.
    pub async fn login(&self, credentials: LoginRequest) -> Result<UserResponse, ApiError> {
        let epoch = self.begin();
        let token = match self.client.exchange_credentials(&credentials).await {
            Ok(token) => token,
            Err(err) => {
                self.enter_unauthorized(epoch);
                return Err(err);
            }
        };
        if !self.is_current(epoch) {
            return Err(superseded());
        }
        self.tokens.set(&token.access_token);
        self.resolve_profile(epoch).await
    }

    /// Drops the session from any state. Idempotent.
    pub fn logout(&self) {
        let epoch = self.begin();
        self.enter_unauthorized(epoch);
    }

    /// Reaction to a rejected token on any request.
    pub fn expire(&self) {
        if self.session() == Session::Unauthorized {
            self.tokens.clear();
            return;
        }
        log::warn!("Session expired");
        self.logout();
    }

    async fn resolve_profile(&self, epoch: u64) -> Result<UserResponse, ApiError> {
        match self.client.get_me().await {
            Ok(user) => {
                if self.transition(epoch, Session::Authorized(user.clone())) {
                    Ok(user)
                } else {
                    Err(superseded())
                }
            }
            Err(err) => {
                self.enter_unauthorized(epoch);
                Err(err)
            }
        }
    }

    fn begin(&self) -> u64 {
        let mut machine = self.machine.borrow_mut();
        machine.epoch += 1;
        machine.epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.machine.borrow().epoch == epoch
    }

    fn enter_unauthorized(&self, epoch: u64) {
        if self.transition(epoch, Session::Unauthorized) {
            self.tokens.clear();
        }
    }

    fn transition(&self, epoch: u64, next: Session) -> bool {
        let observers = {
            let mut machine = self.machine.borrow_mut();
            if machine.epoch != epoch {
                log::debug!(
                    "Dropping session update from epoch {} (current {})",
                    epoch,
                    machine.epoch
                );
                return false;
            }
            machine.session = next.clone();
            machine.observers.clone()
        };
        for observer in observers {
            observer(&next);
        }
        true
    }
}

fn superseded() -> ApiError {
    ApiError::unknown("Sign-in was superseded by a newer session change")
}
