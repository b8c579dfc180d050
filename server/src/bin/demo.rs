//! Console walkthrough of the ticket model.
//!
//! Builds tickets with text, image, video and composite descriptions, edits
//! them, walks the status lifecycle and prints both the on-screen rendering
//! and the PDF-text export of each description.
//!
//! ```bash
//! cargo run --bin demo
//! ```

use anyhow::Context;
use ticketdesk_core::environment::{Clock, SystemClock};
use ticketdesk_domain::{ContentNode, Permission, Ticket, TicketId, TicketStatus, User, UserId};

fn section(title: &str) {
    let rule = "-".repeat(62);
    println!("\n{rule}\n{title}\n{rule}\n");
}

fn show(ticket: &Ticket) {
    println!("-> On screen:");
    println!("{}", ticket.summary());
    println!("{}", ticket.description().display());
    println!("-> PDF export:");
    println!("{}", ticket.export());
}

#[allow(clippy::too_many_lines)]
fn main() -> anyhow::Result<()> {
    let clock = SystemClock;
    let banner = "=".repeat(62);
    println!("{banner}\n   Help-desk ticket model walkthrough\n{banner}");

    let developer = User::new(UserId::new(1), "Utilisateur1", "utilisateur1@uqac.ca", "Developpeur");
    let tester = User::new(UserId::new(2), "Utilisateur2", "utilisateur2@uqac.ca", "Testeur");
    let admin = User::admin(UserId::new(100), "Utilisateur3", "utilisateur3@uqac.ca");

    section("1. Plain text description");
    let text_ticket = Ticket::new(
        TicketId::new(1001),
        "Bug critique - Crash a la connexion",
        ContentNode::text(
            "L'application crash lorsqu'on clique sur le bouton de connexion apres 3 tentatives echouees.",
        ),
        "Haute",
        developer.id,
        clock.now(),
    );
    show(&text_ticket);

    section("2. Image with caption");
    let image_ticket = Ticket::new(
        TicketId::new(2002),
        "Amelioration UI",
        ContentNode::image("/captures/ui_mobile.png", "Boutons trop petits sur mobile"),
        "Moyenne",
        developer.id,
        clock.now(),
    );
    show(&image_ticket);

    section("3. Video");
    let video_ticket = Ticket::new(
        TicketId::new(2003),
        "Bug - Reproduction en video",
        ContentNode::video("/videos/crash_repro.mp4", 95),
        "Haute",
        tester.id,
        clock.now(),
    );
    show(&video_ticket);

    section("4. Composite description (text + image + text + video)");
    let mut rich = ContentNode::composite(Vec::new());
    rich.push(ContentNode::text(
        "Probleme de validation du code 2FA apres plusieurs tentatives.",
    ))?;
    rich.push(ContentNode::image("/captures/2fa_error.png", "Ecran d'erreur 2FA"))?;
    rich.push(ContentNode::text("Le code est refuse meme lorsqu'il est valide."))?;
    rich.push(ContentNode::video("/videos/demo_bug.mp4", 125))?;
    let mut composite_ticket = Ticket::new(
        TicketId::new(2004),
        "Bug 2FA - Description complete",
        rich,
        "Critique",
        tester.id,
        clock.now(),
    );
    show(&composite_ticket);

    section("5. Replacing a description");
    let mut docs_ticket = Ticket::new(
        TicketId::new(2005),
        "Documentation manquante",
        ContentNode::text("Il manque des exemples dans la documentation de l'API"),
        "Basse",
        tester.id,
        clock.now(),
    );
    println!("{}", docs_ticket.description().display());
    docs_ticket.set_description(
        ContentNode::composite([
            ContentNode::text("Il manque des exemples dans la documentation de l'API"),
            ContentNode::image("/doc/api_missing_example1.png", "Section 3.2 incomplete"),
            ContentNode::image("/doc/api_missing_example2.png", "Section 4.1 incomplete"),
        ]),
        clock.now(),
    );
    println!("[OK] Description replaced\n");
    println!("{}", docs_ticket.description().display());

    section("6. Assignment and comments");
    if admin.has_permission(Permission::AssignTicket) {
        composite_ticket.assign(developer.id, clock.now());
        println!("{} assigned #{} to {}", admin.name, composite_ticket.id(), developer.name);
    }
    for comment in [
        "Investigation en cours - logs analyses",
        "Bug reproduit en environnement de test",
        "Correctif applique - en attente de validation",
    ] {
        composite_ticket.add_comment(comment, clock.now())?;
    }
    composite_ticket
        .change_status(Some(TicketStatus::InValidation), clock.now())
        .context("Assigned -> In validation should be legal")?;
    println!("Comments on #{}:", composite_ticket.id());
    for (index, comment) in composite_ticket.comments().iter().enumerate() {
        println!("  {}. {comment}", index + 1);
    }

    section("7. Status transitions");
    let status = composite_ticket.status();
    let allowed: Vec<_> = status
        .allowed_successors()
        .iter()
        .map(|s| s.display_name())
        .collect();
    println!("Current status of #{}: {status}", composite_ticket.id());
    println!("Allowed transitions: {}", allowed.join(", "));

    composite_ticket
        .change_status(Some(TicketStatus::Done), clock.now())
        .context("In validation -> Done should be legal")?;
    println!("[OK] Moved to {}\n", composite_ticket.status());

    println!("Trying an illegal transition (Done -> Open)...");
    match composite_ticket.change_status(Some(TicketStatus::Open), clock.now()) {
        Ok(_) => println!("[UNEXPECTED] Transition accepted"),
        Err(error) => println!("[ERROR] Transition refused: {error}"),
    }

    section("8. Administrators are regular users with full access");
    let admin_ticket = Ticket::new(
        TicketId::new(2006),
        "Nouvelle fonctionnalite admin",
        ContentNode::text("Les administrateurs peuvent creer des tickets directement"),
        "Moyenne",
        admin.id,
        clock.now(),
    );
    println!(
        "[OK] {} (admin: {}) opened #{} - status {}",
        admin.name,
        admin.is_admin,
        admin_ticket.id(),
        admin_ticket.status()
    );

    section("9. Overview");
    for ticket in [
        &text_ticket,
        &image_ticket,
        &video_ticket,
        &composite_ticket,
        &docs_ticket,
        &admin_ticket,
    ] {
        println!("{}", ticket.summary());
    }

    println!("\n{banner}\n   Walkthrough complete\n{banner}");
    Ok(())
}
