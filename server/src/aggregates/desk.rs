//! Help-desk aggregate.
//!
//! One [`DeskState`] holds every ticket, user and session. It lives inside a
//! single `Store`, so each command below runs its lookup and its mutation
//! under the store's write lock: two requests touching the same ticket are
//! serialized rather than racing.
//!
//! Every command carries a `correlation_id` and is answered by exactly one
//! reply action, published through an effect. HTTP handlers wait for the
//! reply with `Store::send_and_wait_for`; observers see it on the broadcast.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use ticketdesk_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, SystemClock, TokenGenerator, UuidTokenGenerator},
    reducer::Reducer,
    smallvec,
};
use ticketdesk_domain::{
    ContentNode, DomainError, Permission, Ticket, TicketId, TicketStatus, User, UserId,
    validation,
};
use uuid::Uuid;

/// First value of the ticket counter; ids are pre-incremented
pub const TICKET_ID_BASE: u32 = 1000;

// ============================================================================
// State
// ============================================================================

/// Tickets, users and sessions
#[derive(Clone, Debug)]
pub struct DeskState {
    /// Tickets by id
    pub tickets: BTreeMap<TicketId, Ticket>,
    /// Users by id
    pub users: BTreeMap<UserId, User>,
    /// Session token to user
    pub sessions: HashMap<String, UserId>,
    /// Last ticket id handed out
    pub next_ticket_id: u32,
}

impl Default for DeskState {
    fn default() -> Self {
        Self {
            tickets: BTreeMap::new(),
            users: BTreeMap::new(),
            sessions: HashMap::new(),
            next_ticket_id: TICKET_ID_BASE,
        }
    }
}

impl DeskState {
    /// Empty desk
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket by id
    #[must_use]
    pub fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.get(&id)
    }

    /// User by id
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// User behind a session token
    #[must_use]
    pub fn session_user(&self, token: &str) -> Option<&User> {
        self.sessions.get(token).and_then(|id| self.users.get(id))
    }

    /// Display name of a user, `User #<id>` when unknown
    #[must_use]
    pub fn user_name(&self, id: UserId) -> String {
        self.user(id)
            .map_or_else(|| format!("User #{id}"), |user| user.name.clone())
    }

    fn allocate_ticket_id(&mut self) -> TicketId {
        self.next_ticket_id += 1;
        TicketId::new(self.next_ticket_id)
    }

    fn require_user(&self, id: UserId) -> Result<&User, RejectionReason> {
        self.user(id).ok_or(RejectionReason::UserNotFound(id))
    }

    fn require_permission(&self, id: UserId, permission: Permission) -> Result<(), RejectionReason> {
        if self.require_user(id)?.has_permission(permission) {
            Ok(())
        } else {
            Err(RejectionReason::Forbidden(permission))
        }
    }

    fn ticket_mut(&mut self, id: TicketId) -> Result<&mut Ticket, RejectionReason> {
        self.tickets
            .get_mut(&id)
            .ok_or(RejectionReason::TicketNotFound(id))
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Why a command was refused
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectionReason {
    /// No ticket with this id
    TicketNotFound(TicketId),
    /// No user with this id
    UserNotFound(UserId),
    /// The domain refused the change
    Domain(DomainError),
    /// Input failed validation
    Validation(String),
    /// The requesting user lacks a permission
    Forbidden(Permission),
}

impl RejectionReason {
    /// Field validation failure, keeping only the message
    #[must_use]
    pub fn invalid_input(error: DomainError) -> Self {
        match error {
            DomainError::InvalidArgument(message) => Self::Validation(message),
            other @ DomainError::InvalidTransition { .. } => Self::Domain(other),
        }
    }

    /// Short label, used as a metrics dimension
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TicketNotFound(_) => "ticket_not_found",
            Self::UserNotFound(_) => "user_not_found",
            Self::Domain(DomainError::InvalidTransition { .. }) => "invalid_transition",
            Self::Domain(DomainError::InvalidArgument(_)) => "invalid_argument",
            Self::Validation(_) => "validation",
            Self::Forbidden(_) => "forbidden",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TicketNotFound(id) => write!(f, "Ticket #{id} not found"),
            Self::UserNotFound(id) => write!(f, "User #{id} not found"),
            Self::Domain(error) => write!(f, "{error}"),
            Self::Validation(message) => f.write_str(message),
            Self::Forbidden(permission) => write!(f, "Missing permission {permission:?}"),
        }
    }
}

impl From<DomainError> for RejectionReason {
    fn from(error: DomainError) -> Self {
        Self::Domain(error)
    }
}

/// Commands and their replies
#[derive(Clone, Debug)]
pub enum DeskAction {
    // Commands
    /// Add or replace a user
    RegisterUser {
        /// Request id
        correlation_id: Uuid,
        /// User to store
        user: User,
    },
    /// Open a new ticket
    CreateTicket {
        /// Request id
        correlation_id: Uuid,
        /// Title
        title: String,
        /// Priority label
        priority: String,
        /// Description tree
        description: ContentNode,
        /// Creator; the first registered user when absent
        created_by: Option<UserId>,
    },
    /// Partial update; `None` fields are left alone
    UpdateTicket {
        /// Request id
        correlation_id: Uuid,
        /// Target ticket
        ticket_id: TicketId,
        /// New title
        title: Option<String>,
        /// New priority
        priority: Option<String>,
        /// Replacement description
        description: Option<ContentNode>,
        /// Session user, checked against the ticket's creator when present
        requested_by: Option<UserId>,
    },
    /// Remove a ticket
    DeleteTicket {
        /// Request id
        correlation_id: Uuid,
        /// Target ticket
        ticket_id: TicketId,
        /// Session user asking for the deletion
        requested_by: UserId,
    },
    /// Append a comment
    AddComment {
        /// Request id
        correlation_id: Uuid,
        /// Target ticket
        ticket_id: TicketId,
        /// Comment text
        text: String,
    },
    /// Validated status change
    ChangeStatus {
        /// Request id
        correlation_id: Uuid,
        /// Target ticket
        ticket_id: TicketId,
        /// Requested status
        to: Option<TicketStatus>,
    },
    /// Assign a ticket, forcing it to `Assigned`
    AssignTicket {
        /// Request id
        correlation_id: Uuid,
        /// Target ticket
        ticket_id: TicketId,
        /// Assignee
        user_id: UserId,
        /// Session user asking for the assignment
        requested_by: UserId,
    },
    /// Open a session
    Login {
        /// Request id
        correlation_id: Uuid,
        /// User logging in
        user_id: UserId,
    },
    /// Drop a session
    Logout {
        /// Request id
        correlation_id: Uuid,
        /// Session token
        token: String,
    },

    // Replies
    /// A user was stored
    UserRegistered {
        /// Request id
        correlation_id: Uuid,
        /// Stored user
        user: User,
    },
    /// A ticket was opened
    TicketCreated {
        /// Request id
        correlation_id: Uuid,
        /// The new ticket
        ticket: Ticket,
    },
    /// A ticket changed
    TicketUpdated {
        /// Request id
        correlation_id: Uuid,
        /// Ticket after the change
        ticket: Ticket,
        /// Status before the change, when the status moved
        previous_status: Option<TicketStatus>,
    },
    /// A ticket was removed
    TicketDeleted {
        /// Request id
        correlation_id: Uuid,
        /// Removed ticket
        ticket_id: TicketId,
    },
    /// A comment was appended
    CommentAdded {
        /// Request id
        correlation_id: Uuid,
        /// Target ticket
        ticket_id: TicketId,
        /// Comment text
        text: String,
    },
    /// A session was opened
    LoggedIn {
        /// Request id
        correlation_id: Uuid,
        /// Session token
        token: String,
        /// Session user
        user: User,
    },
    /// A session was dropped
    LoggedOut {
        /// Request id
        correlation_id: Uuid,
        /// User whose session ended, if the token was known
        user_id: Option<UserId>,
    },
    /// The command was refused; state is unchanged
    CommandRejected {
        /// Request id
        correlation_id: Uuid,
        /// Why
        reason: RejectionReason,
    },
}

impl DeskAction {
    /// Correlation id of a command or reply
    #[must_use]
    pub const fn correlation_id(&self) -> Uuid {
        match self {
            Self::RegisterUser { correlation_id, .. }
            | Self::CreateTicket { correlation_id, .. }
            | Self::UpdateTicket { correlation_id, .. }
            | Self::DeleteTicket { correlation_id, .. }
            | Self::AddComment { correlation_id, .. }
            | Self::ChangeStatus { correlation_id, .. }
            | Self::AssignTicket { correlation_id, .. }
            | Self::Login { correlation_id, .. }
            | Self::Logout { correlation_id, .. }
            | Self::UserRegistered { correlation_id, .. }
            | Self::TicketCreated { correlation_id, .. }
            | Self::TicketUpdated { correlation_id, .. }
            | Self::TicketDeleted { correlation_id, .. }
            | Self::CommentAdded { correlation_id, .. }
            | Self::LoggedIn { correlation_id, .. }
            | Self::LoggedOut { correlation_id, .. }
            | Self::CommandRejected { correlation_id, .. } => *correlation_id,
        }
    }

    /// Whether this is a reply rather than a command
    #[must_use]
    pub const fn is_reply(&self) -> bool {
        matches!(
            self,
            Self::UserRegistered { .. }
                | Self::TicketCreated { .. }
                | Self::TicketUpdated { .. }
                | Self::TicketDeleted { .. }
                | Self::CommentAdded { .. }
                | Self::LoggedIn { .. }
                | Self::LoggedOut { .. }
                | Self::CommandRejected { .. }
        )
    }

    /// Whether this is the reply to the command tagged `correlation_id`
    #[must_use]
    pub fn is_reply_to(&self, correlation_id: Uuid) -> bool {
        self.is_reply() && self.correlation_id() == correlation_id
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Environment dependencies for the desk
#[derive(Clone)]
pub struct DeskEnvironment {
    /// Clock for timestamps
    pub clock: Arc<dyn Clock>,
    /// Session token source
    pub tokens: Arc<dyn TokenGenerator>,
}

impl DeskEnvironment {
    /// Creates a new `DeskEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, tokens: Arc<dyn TokenGenerator>) -> Self {
        Self { clock, tokens }
    }

    /// System clock and `session_<uuid>` tokens
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidTokenGenerator))
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the help desk
#[derive(Clone, Copy, Debug, Default)]
pub struct DeskReducer;

impl DeskReducer {
    /// Creates a new `DeskReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn create_ticket(
        state: &mut DeskState,
        title: String,
        priority: String,
        description: ContentNode,
        created_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<Ticket, RejectionReason> {
        validation::validate_title(&title).map_err(RejectionReason::invalid_input)?;
        validation::validate_priority(&priority).map_err(RejectionReason::invalid_input)?;

        let creator = match created_by {
            Some(id) => state.require_user(id)?.id,
            None => *state.users.keys().next().ok_or_else(|| {
                RejectionReason::Validation("No user available to own the ticket".to_string())
            })?,
        };

        let id = state.allocate_ticket_id();
        let ticket = Ticket::new(id, title.trim(), description, priority.trim(), creator, now);
        state.tickets.insert(id, ticket.clone());
        Ok(ticket)
    }

    fn update_ticket(
        state: &mut DeskState,
        ticket_id: TicketId,
        title: Option<String>,
        priority: Option<String>,
        description: Option<ContentNode>,
        requested_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<Ticket, RejectionReason> {
        // validate everything before touching the ticket
        if let Some(title) = &title {
            validation::validate_title(title).map_err(RejectionReason::invalid_input)?;
        }
        if let Some(priority) = &priority {
            validation::validate_priority(priority).map_err(RejectionReason::invalid_input)?;
        }

        let creator = state
            .ticket(ticket_id)
            .map(Ticket::created_by)
            .ok_or(RejectionReason::TicketNotFound(ticket_id))?;
        let allowed = match requested_by {
            Some(requester) => state.require_user(requester)?.can_edit(creator),
            None => true,
        };
        if !allowed {
            return Err(RejectionReason::Forbidden(Permission::EditTicket));
        }

        let ticket = state.ticket_mut(ticket_id)?;
        if let Some(title) = title {
            ticket.rename(title.trim(), now);
        }
        if let Some(priority) = priority {
            ticket.set_priority(priority.trim(), now);
        }
        if let Some(description) = description {
            ticket.set_description(description, now);
        }
        Ok(ticket.clone())
    }

    fn assign_ticket(
        state: &mut DeskState,
        ticket_id: TicketId,
        user_id: UserId,
        requested_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<(Ticket, TicketStatus), RejectionReason> {
        state.require_permission(requested_by, Permission::AssignTicket)?;
        state.require_user(user_id)?;

        let ticket = state.ticket_mut(ticket_id)?;
        let previous = ticket.status();
        ticket.assign(user_id, now);
        Ok((ticket.clone(), previous))
    }

    fn handle(
        state: &mut DeskState,
        action: DeskAction,
        env: &DeskEnvironment,
    ) -> Option<DeskAction> {
        let correlation_id = action.correlation_id();

        let outcome = match action {
            DeskAction::RegisterUser { user, .. } => {
                state.users.insert(user.id, user.clone());
                Ok(DeskAction::UserRegistered { correlation_id, user })
            }

            DeskAction::CreateTicket {
                title,
                priority,
                description,
                created_by,
                ..
            } => Self::create_ticket(state, title, priority, description, created_by, env.clock.now())
                .map(|ticket| DeskAction::TicketCreated { correlation_id, ticket }),

            DeskAction::UpdateTicket {
                ticket_id,
                title,
                priority,
                description,
                requested_by,
                ..
            } => Self::update_ticket(
                state,
                ticket_id,
                title,
                priority,
                description,
                requested_by,
                env.clock.now(),
            )
                .map(|ticket| DeskAction::TicketUpdated {
                    correlation_id,
                    ticket,
                    previous_status: None,
                }),

            DeskAction::DeleteTicket {
                ticket_id,
                requested_by,
                ..
            } => state
                .require_permission(requested_by, Permission::DeleteTicket)
                .and_then(|()| {
                    state
                        .tickets
                        .remove(&ticket_id)
                        .ok_or(RejectionReason::TicketNotFound(ticket_id))
                })
                .map(|_| DeskAction::TicketDeleted {
                    correlation_id,
                    ticket_id,
                }),

            DeskAction::AddComment {
                ticket_id, text, ..
            } => {
                let now = env.clock.now();
                state.ticket_mut(ticket_id).and_then(|ticket| {
                    ticket.add_comment(text.clone(), now)?;
                    Ok(DeskAction::CommentAdded {
                        correlation_id,
                        ticket_id,
                        text,
                    })
                })
            }

            DeskAction::ChangeStatus { ticket_id, to, .. } => {
                let now = env.clock.now();
                state.ticket_mut(ticket_id).and_then(|ticket| {
                    let previous = ticket.change_status(to, now)?;
                    Ok(DeskAction::TicketUpdated {
                        correlation_id,
                        ticket: ticket.clone(),
                        previous_status: Some(previous),
                    })
                })
            }

            DeskAction::AssignTicket {
                ticket_id,
                user_id,
                requested_by,
                ..
            } => Self::assign_ticket(state, ticket_id, user_id, requested_by, env.clock.now()).map(
                |(ticket, previous)| DeskAction::TicketUpdated {
                    correlation_id,
                    ticket,
                    previous_status: Some(previous),
                },
            ),

            DeskAction::Login { user_id, .. } => state.require_user(user_id).cloned().map(|user| {
                let token = env.tokens.generate();
                state.sessions.insert(token.clone(), user_id);
                DeskAction::LoggedIn {
                    correlation_id,
                    token,
                    user,
                }
            }),

            DeskAction::Logout { token, .. } => Ok(DeskAction::LoggedOut {
                correlation_id,
                user_id: state.sessions.remove(&token),
            }),

            // Replies come back through the store after being broadcast
            DeskAction::UserRegistered { .. }
            | DeskAction::TicketCreated { .. }
            | DeskAction::TicketUpdated { .. }
            | DeskAction::TicketDeleted { .. }
            | DeskAction::CommentAdded { .. }
            | DeskAction::LoggedIn { .. }
            | DeskAction::LoggedOut { .. }
            | DeskAction::CommandRejected { .. } => return None,
        };

        Some(outcome.unwrap_or_else(|reason| DeskAction::CommandRejected {
            correlation_id,
            reason,
        }))
    }
}

impl Reducer for DeskReducer {
    type State = DeskState;
    type Action = DeskAction;
    type Environment = DeskEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match Self::handle(state, action, env) {
            Some(reply) => smallvec![Effect::reply(reply)],
            None => SmallVec::new(),
        }
    }
}
