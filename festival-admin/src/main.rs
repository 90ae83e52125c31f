use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use festival_frontend_rs::festival_types::{EntryId, LostId, Prize};
use festival_frontend_rs::post_list::PostRow;
use festival_frontend_rs::{
    AuthContext, DrawKind, EntryListView, HttpAdminApi, PostListView, ViewError,
};

#[derive(Parser, Debug)]
#[command(version, about = "Festival admin console", long_about = None)]
struct Args {
    /// Base URL of the festival API
    #[arg(long, env = "FESTIVAL_API_URL")]
    api_url: String,

    /// Admin access token
    #[arg(long, env = "FESTIVAL_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct PrizeArgs {
    /// Prize name as shown on the event page (에어팟, 변신로봇, 단검)
    #[arg(short, long)]
    prize: String,

    /// Number of winners for the prize
    #[arg(short, long, default_value_t = 1)]
    quantity: usize,

    /// Line shown under the list heading
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List entrants for a prize
    Entries {
        #[command(flatten)]
        prize: PrizeArgs,
        /// Show every page instead of the first
        #[arg(long)]
        all: bool,
    },
    /// Draw winners for a prize
    Draw {
        #[command(flatten)]
        prize: PrizeArgs,
        /// Draw every remaining winner at once
        #[arg(long)]
        all: bool,
    },
    /// Take back a win
    CancelWinner {
        #[command(flatten)]
        prize: PrizeArgs,
        entry_id: String,
    },
    /// List lost-and-found posts
    Posts {
        #[arg(long)]
        all: bool,
    },
    /// Delete a lost-and-found post
    DeletePost {
        lost_id: String,
        /// Also block the post's author
        #[arg(long)]
        block: bool,
    },
    /// Restore a deleted post
    RestorePost { lost_id: String },
}

fn entry_list(prize: &PrizeArgs) -> EntryListView {
    if Prize::from_display_name(&prize.prize).is_none() {
        log::warn!(
            "Unknown prize {}, expected one of {:?}",
            prize.prize,
            Prize::ALL.map(|p| p.display_name())
        );
    }
    let view = EntryListView::new(prize.prize.as_str(), prize.prize.as_str(), prize.quantity);
    match &prize.description {
        Some(description) => view.with_description(description.as_str()),
        None => view,
    }
}

fn print_entries(view: &mut EntryListView, all: bool) {
    println!("{}", view.heading());
    if let Some(description) = view.description() {
        println!("{description}");
    }
    if let Some(message) = view.empty_message() {
        println!("  {message}");
        return;
    }
    if all {
        while view.load_more() {}
    }
    for row in view.rows() {
        println!(
            "  {:>6}  {}  {:<10} {}",
            row.entry.entry_id, row.status_label, row.entry.name, row.phone
        );
    }
    if view.has_more() {
        println!(
            "  ... {} more (use --all)",
            view.entries().len() - view.window().len()
        );
    }

    let controls = view.draw_controls();
    println!(
        "  drawn {}/{}  [{}{}] [{}{}]",
        view.drawn_count(),
        view.quantity(),
        controls.single.label(),
        if controls.single.enabled { "" } else { " (disabled)" },
        controls.full.label(),
        if controls.full.enabled { "" } else { " (disabled)" },
    );
}

fn print_post(row: &PostRow) {
    let author = if row.author_blocked {
        format!("{} (차단됨)", row.author)
    } else {
        row.author.clone()
    };
    println!(
        "  {:>6}  · {}  작성자 {}  {}  {}",
        row.lost.lost_id,
        row.status_label,
        author,
        row.created_at,
        row.lost.content.as_deref().unwrap_or("")
    );
}

fn print_posts(view: &mut PostListView, all: bool) {
    if let Some(message) = view.empty_message() {
        println!("  {message}");
        return;
    }
    if all {
        while view.load_more() {}
    }
    for row in view.rows() {
        print_post(&row);
    }
    if view.shows_load_more() {
        println!(
            "  ... {} more (use --all)",
            view.list().len() - view.visible().len()
        );
    }
}

fn report_alert(view: &mut PostListView, result: Result<bool, ViewError>) -> Result<()> {
    if let Some(alert) = view.take_alert() {
        eprintln!("{alert}");
    }
    match result {
        Ok(true) => Ok(()),
        Ok(false) => {
            println!("Nothing to change.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let api = HttpAdminApi::new(args.api_url);
    let auth = AuthContext::bearer(args.token);

    match args.command {
        Command::Entries { prize, all } => {
            let mut view = entry_list(&prize);
            view.load(&api, &auth)
                .await
                .context("Failed to load entries")?;
            print_entries(&mut view, all);
        }
        Command::Draw { prize, all } => {
            let mut view = entry_list(&prize);
            view.load(&api, &auth)
                .await
                .context("Failed to load entries")?;
            let kind = if all { DrawKind::All } else { DrawKind::One };
            view.draw(&api, &auth, kind)
                .await
                .with_context(|| format!("Failed to run {kind}"))?;
            print_entries(&mut view, true);
        }
        Command::CancelWinner { prize, entry_id } => {
            let mut view = entry_list(&prize);
            view.load(&api, &auth)
                .await
                .context("Failed to load entries")?;
            let entry_id = EntryId::from(entry_id);
            if !view
                .entries()
                .iter()
                .any(|entry| entry.entry_id == entry_id && entry.winner)
            {
                bail!("Entry {entry_id} is not a winner for {}", prize.prize);
            }
            view.cancel_winner(&api, &auth, &entry_id)
                .await
                .with_context(|| format!("Failed to cancel winner {entry_id}"))?;
            print_entries(&mut view, true);
        }
        Command::Posts { all } => {
            let mut view = PostListView::new();
            view.load(&api, &auth).await.context("Failed to load posts")?;
            print_posts(&mut view, all);
        }
        Command::DeletePost { lost_id, block } => {
            let mut view = PostListView::new();
            view.load(&api, &auth).await.context("Failed to load posts")?;
            let lost_id = LostId::from(lost_id);
            let result = if block {
                view.delete_and_block(&api, &auth, &lost_id).await
            } else {
                view.soft_delete(&api, &auth, &lost_id).await
            };
            report_alert(&mut view, result)
                .with_context(|| format!("Failed to delete post {lost_id}"))?;
            if let Some(lost) = view.find(&lost_id) {
                println!("Post {lost_id} is now {}", lost.lost_status.label());
            }
        }
        Command::RestorePost { lost_id } => {
            let mut view = PostListView::new();
            view.load(&api, &auth).await.context("Failed to load posts")?;
            let lost_id = LostId::from(lost_id);
            let result = view.undo_delete(&api, &auth, &lost_id).await;
            report_alert(&mut view, result)
                .with_context(|| format!("Failed to restore post {lost_id}"))?;
        }
    }

    Ok(())
}
