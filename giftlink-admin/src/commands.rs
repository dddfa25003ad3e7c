// File: giftlink-admin/src/commands.rs

use std::path::PathBuf;

use clap::Subcommand;
use uuid::Uuid;

use giftlink_common::error::Error;
use giftlink_common::models::campaign::CampaignDraft;
use giftlink_common::models::duplicate::DuplicateDecision;
use giftlink_common::models::order::{OrderFilter, OrderSort, OrderStatus};

use crate::context::AdminContext;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply pending database migrations.
    Migrate,
    /// Campaign management.
    #[command(subcommand)]
    Campaign(CampaignCommand),
    /// Order review.
    #[command(subcommand)]
    Orders(OrdersCommand),
    /// Duplicate-attempt review.
    #[command(subcommand)]
    Duplicates(DuplicatesCommand),
}

#[derive(Subcommand, Debug)]
pub enum CampaignCommand {
    /// Publish a campaign from a JSON draft file (builder shape,
    /// camelCase fields).
    Create {
        #[arg(long)]
        draft: PathBuf,
    },
    /// List campaigns, newest first.
    List {
        /// Include archived campaigns.
        #[arg(long)]
        all: bool,
    },
    /// Archive a campaign; its claim link stops resolving.
    Archive {
        #[arg(long)]
        id: Uuid,
    },
    /// Show the claim page a public slug resolves to.
    Show {
        #[arg(long)]
        slug: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    /// List orders.
    List {
        /// Restrict to one campaign.
        #[arg(long)]
        campaign: Option<Uuid>,
        /// pending | fulfilled
        #[arg(long)]
        status: Option<String>,
        /// newest | oldest | value | email
        #[arg(long, default_value = "newest")]
        sort: String,
        #[arg(long, default_value_t = 100)]
        limit: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum DuplicatesCommand {
    /// List quarantined attempts, newest first.
    List {
        #[arg(long, default_value_t = 100)]
        limit: i64,
    },
    /// Promote an attempt into a real order and drop it from the queue.
    Accept {
        #[arg(long)]
        id: Uuid,
    },
    /// Discard an attempt with no other side effect.
    Decline {
        #[arg(long)]
        id: Uuid,
    },
    /// Tag an attempt (pending | accepted | declined) without resolving it.
    Triage {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        decision: String,
    },
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub async fn run(ctx: &AdminContext, command: Command) -> CmdResult {
    match command {
        Command::Migrate => {
            ctx.db.migrate().await?;
            println!("Migrations applied.");
            Ok(())
        }
        Command::Campaign(cmd) => run_campaign(ctx, cmd).await,
        Command::Orders(cmd) => run_orders(ctx, cmd).await,
        Command::Duplicates(cmd) => run_duplicates(ctx, cmd).await,
    }
}

async fn run_campaign(ctx: &AdminContext, cmd: CampaignCommand) -> CmdResult {
    match cmd {
        CampaignCommand::Create { draft } => {
            let raw = std::fs::read_to_string(&draft)?;
            let draft: CampaignDraft = serde_json::from_str(&raw)?;
            let campaign = ctx.campaigns.publish(&draft).await?;
            println!("Published '{}' => /c/{}", campaign.name, campaign.slug);
        }
        CampaignCommand::List { all } => {
            let campaigns = ctx.campaigns.list(all).await?;
            println!(
                "{:<38} {:<24} {:<26} {:<9} {:>7}",
                "ID", "NAME", "SLUG", "STATUS", "CLAIMS"
            );
            for c in &campaigns {
                println!(
                    "{:<38} {:<24} {:<26} {:<9} {:>7}",
                    c.campaign_id,
                    clip(&c.name, 24),
                    clip(&c.slug, 26),
                    c.status,
                    c.claims
                );
            }
            println!("{} campaign(s).", campaigns.len());
        }
        CampaignCommand::Archive { id } => {
            ctx.campaigns.archive(id).await?;
            println!("Archived campaign {id}.");
        }
        CampaignCommand::Show { slug } => match ctx.campaigns.load_claim_page(&slug).await? {
            Some(page) => {
                println!("{} (/c/{})", page.campaign.name, page.campaign.slug);
                println!("  welcome:    {}", page.campaign.welcome_message);
                println!("  item limit: {}", page.campaign.config.item_limit);
                println!("  ships to:   {}", page.campaign.config.shipping_zone);
                println!("  products:");
                for p in &page.products {
                    println!("    {:<4} {:<28} ${:>8.2}", p.id, clip(&p.title, 28), p.price);
                }
            }
            None => println!("No active campaign at slug '{slug}'."),
        },
    }
    Ok(())
}

async fn run_orders(ctx: &AdminContext, cmd: OrdersCommand) -> CmdResult {
    match cmd {
        OrdersCommand::List {
            campaign,
            status,
            sort,
            limit,
        } => {
            let status = match status {
                Some(raw) => Some(raw.parse::<OrderStatus>().map_err(Error::from)?),
                None => None,
            };
            let sort: OrderSort = sort.parse().map_err(Error::from)?;
            let filter = OrderFilter {
                campaign_id: campaign,
                status,
            };

            let orders = ctx.orders.list_orders(&filter, sort, limit).await?;
            println!(
                "{:<38} {:<22} {:<28} {:>9} {:<10} {}",
                "ID", "CAMPAIGN", "EMAIL", "VALUE", "STATUS", "CREATED"
            );
            for o in &orders {
                println!(
                    "{:<38} {:<22} {:<28} {:>9.2} {:<10} {}",
                    o.order_id,
                    clip(&o.campaign_name, 22),
                    clip(&o.email, 28),
                    o.value(),
                    o.status,
                    o.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            println!("{} order(s).", orders.len());
        }
    }
    Ok(())
}

async fn run_duplicates(ctx: &AdminContext, cmd: DuplicatesCommand) -> CmdResult {
    match cmd {
        DuplicatesCommand::List { limit } => {
            let attempts = ctx.duplicates.list(limit).await?;
            println!(
                "{:<38} {:<22} {:<28} {:<9} {}",
                "ID", "CAMPAIGN", "EMAIL", "DECISION", "CREATED"
            );
            for a in &attempts {
                println!(
                    "{:<38} {:<22} {:<28} {:<9} {}",
                    a.attempt_id,
                    clip(&a.campaign_name, 22),
                    clip(&a.payload.email, 28),
                    a.decision,
                    a.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            println!("{} attempt(s).", attempts.len());
        }
        DuplicatesCommand::Accept { id } => {
            let order = ctx.duplicates.accept(id).await?;
            println!("Accepted attempt {id}; created order {}.", order.order_id);
        }
        DuplicatesCommand::Decline { id } => {
            ctx.duplicates.decline(id).await?;
            println!("Declined attempt {id}.");
        }
        DuplicatesCommand::Triage { id, decision } => {
            let decision: DuplicateDecision = decision.parse().map_err(Error::from)?;
            ctx.duplicates.set_decision(id, decision).await?;
            println!("Attempt {id} tagged {decision}.");
        }
    }
    Ok(())
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
