//! Demo users and tickets loaded at startup.
//!
//! Seeding goes through the same commands as the REST API, so the counter,
//! timestamps and observers behave exactly as for live traffic.

use crate::aggregates::{DeskAction, RejectionReason};
use crate::DeskStore;
use std::time::Duration;
use thiserror::Error;
use ticketdesk_domain::{ContentNode, User, UserId};
use ticketdesk_runtime::StoreError;
use uuid::Uuid;

/// Seeding failures
#[derive(Error, Debug)]
pub enum SeedError {
    /// The store did not answer
    #[error("store error while seeding: {0}")]
    Store(#[from] StoreError),
    /// The desk refused a seed command
    #[error("seed command rejected: {0}")]
    Rejected(RejectionReason),
}

/// The demo users: a developer, a tester and an administrator
#[must_use]
pub fn demo_users() -> Vec<User> {
    vec![
        User::new(UserId::new(1), "Utilisateur1", "utilisateur1@uqac.ca", "Developpeur"),
        User::new(UserId::new(2), "Utilisateur2", "utilisateur2@uqac.ca", "Testeur"),
        User::admin(UserId::new(100), "Admin1", "admin@uqac.ca"),
    ]
}

/// Commands registering the demo users then opening three tickets
#[must_use]
pub fn demo_actions() -> Vec<DeskAction> {
    let mut actions: Vec<DeskAction> = demo_users()
        .into_iter()
        .map(|user| DeskAction::RegisterUser {
            correlation_id: Uuid::new_v4(),
            user,
        })
        .collect();

    actions.push(DeskAction::CreateTicket {
        correlation_id: Uuid::new_v4(),
        title: "Bug critique - Crash à la connexion".to_string(),
        priority: "Haute".to_string(),
        description: ContentNode::text(
            "L'application crash lorsqu'on clique sur le bouton de connexion après 3 tentatives échouées.",
        ),
        created_by: Some(UserId::new(1)),
    });

    actions.push(DeskAction::CreateTicket {
        correlation_id: Uuid::new_v4(),
        title: "Amélioration UI - Responsive design".to_string(),
        priority: "Moyenne".to_string(),
        description: ContentNode::text(
            "L'interface utilisateur n'est pas responsive sur mobile. Les boutons sont trop petits.",
        ),
        created_by: Some(UserId::new(1)),
    });

    actions.push(DeskAction::CreateTicket {
        correlation_id: Uuid::new_v4(),
        title: "Bug 2FA - Validation incorrecte".to_string(),
        priority: "Critique".to_string(),
        description: ContentNode::composite([
            ContentNode::text("Problème de validation du code 2FA après plusieurs tentatives"),
            ContentNode::image("/captures/2fa_error.png", "Écran d'erreur 2FA"),
            ContentNode::video("/videos/demo_bug.mp4", 125),
        ]),
        created_by: Some(UserId::new(2)),
    });

    actions
}

/// Send every demo command and wait for each reply.
///
/// # Errors
///
/// Returns [`SeedError`] if the store fails or refuses a command.
pub async fn load(store: &DeskStore, timeout: Duration) -> Result<usize, SeedError> {
    let actions = demo_actions();
    let count = actions.len();

    for action in actions {
        let correlation_id = action.correlation_id();
        let reply = store
            .send_and_wait_for(action, |a| a.is_reply_to(correlation_id), timeout)
            .await?;

        if let DeskAction::CommandRejected { reason, .. } = reply {
            return Err(SeedError::Rejected(reason));
        }
    }

    tracing::info!(commands = count, "Demo data loaded");
    Ok(count)
}
