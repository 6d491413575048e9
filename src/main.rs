use std::path::PathBuf;

use anyhow::{bail, Context};
use careers_portal::{
    config::{get_config, init_config, LogFormat},
    dto::view_dto::{BrowserView, FormMessage, VacancyCard, VacancyDetailView},
    models::{
        application::{parse_state, Cgpa, Degree, FieldUpdate, Percentage, ResumeFile},
        filter::{FilterChange, SortKey, ViewMode},
        vacancy::{EmploymentType, ExperienceLevel},
    },
    routes::Route,
    services::careers_api::CareersApi,
    AppState,
};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "careers")]
#[command(about = "Browse open vacancies and apply from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List industries available as a filter
    Industries,

    /// List vacancies (promoted only unless --all is given)
    List(ListArgs),

    /// Show one vacancy by id or apply path
    Show {
        /// Vacancy id or a path such as /careers/apply/<id>
        target: String,
    },

    /// Submit an application with a resume
    Apply(ApplyArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long)]
    search: Option<String>,
    /// Industry id
    #[arg(long)]
    industry: Option<String>,
    #[arg(long)]
    employment_type: Option<EmploymentType>,
    #[arg(long)]
    experience: Option<ExperienceLevel>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    remote: bool,
    /// Include vacancies that are not promoted
    #[arg(long)]
    all: bool,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value = "newest")]
    sort: SortKey,
    #[arg(long, default_value = "grid")]
    view: ViewMode,
}

#[derive(Debug, Args)]
struct ApplyArgs {
    /// Vacancy id or a path such as /careers/apply/<id>
    target: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    mobile: String,
    /// 10th percentage (0-100)
    #[arg(long)]
    tenth: Percentage,
    /// 12th/Diploma percentage (0-100)
    #[arg(long)]
    twelfth: Percentage,
    /// B.Tech CSE, B.Tech IT, B.Tech Other Branches or MCA
    #[arg(long)]
    degree: Degree,
    /// Degree CGPA (0-10)
    #[arg(long)]
    cgpa: Cgpa,
    /// PDF, DOC or DOCX file
    #[arg(long)]
    resume: PathBuf,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_config()?;
    let config = get_config()?;
    init_tracing(config.log_format);

    let state = AppState::new(config)?;
    info!(api_url = %config.api_url, "Using careers backend");

    match cli.command {
        Commands::Industries => {
            let industries = state.api.list_industries().await?;
            if industries.is_empty() {
                println!("No industries available.");
            }
            for industry in industries {
                println!("{:<26} {}", industry.id, industry.name);
            }
        }
        Commands::List(args) => list(&state, args).await,
        Commands::Show { target } => {
            let route = Route::from_target(&target)?;
            let job_id = route.job_id().context("Expected a vacancy id or apply path")?;
            let vacancy = state.api.get_vacancy(job_id).await?;
            print_detail(&VacancyDetailView::from(&vacancy));
        }
        Commands::Apply(args) => apply(&state, args).await?,
    }

    Ok(())
}

async fn list(state: &AppState, args: ListArgs) {
    let mut browser = state.browser();

    let changes = [
        args.search.map(FilterChange::Search),
        args.industry.map(|id| FilterChange::Industry(Some(id))),
        args.employment_type.map(|t| FilterChange::EmploymentType(Some(t))),
        args.experience.map(|l| FilterChange::ExperienceLevel(Some(l))),
        args.city.map(FilterChange::City),
        args.state.map(FilterChange::State),
        args.remote.then_some(FilterChange::RemoteOnly(true)),
        args.all.then_some(FilterChange::ShowAll(true)),
        (args.page > 1).then_some(FilterChange::Page(args.page)),
    ];
    for change in changes.into_iter().flatten() {
        browser.update_filter(change);
    }
    browser.set_sort(args.sort);
    browser.set_view_mode(args.view);

    browser.mount().await;

    match browser.view() {
        BrowserView::Loading => println!("Loading..."),
        BrowserView::Error(message) => eprintln!("{}", message),
        BrowserView::Empty => {
            println!("{}", careers_portal::dto::view_dto::NO_RESULTS_MESSAGE)
        }
        BrowserView::Listing {
            roles,
            mode,
            cards,
            pager,
        } => {
            if let Some(roles) = roles {
                println!("{} · sorted by {}", roles, args.sort);
            }
            for card in &cards {
                match mode {
                    ViewMode::Grid => print_card(card),
                    ViewMode::List => print_row(card),
                }
            }
            if let Some(pager) = pager {
                println!(
                    "{}{}{}",
                    if pager.previous_enabled { "< prev  " } else { "" },
                    pager.label,
                    if pager.next_enabled { "  next >" } else { "" }
                );
            }
        }
    }
}

async fn apply(state: &AppState, args: ApplyArgs) -> anyhow::Result<()> {
    let route = Route::from_target(&args.target)?;
    let job_id = route.job_id().unwrap_or_default().to_string();
    let resume = ResumeFile::from_path(&args.resume)
        .await
        .with_context(|| format!("Could not read resume {}", args.resume.display()))?;

    let mut form = state.application_form(job_id);
    form.load().await;
    if let Some(detail) = form.detail() {
        println!("Applying for {} (#{})", detail.title, detail.job_id);
    }

    for update in [
        FieldUpdate::FirstName(args.first_name),
        FieldUpdate::LastName(args.last_name),
        FieldUpdate::Email(args.email),
        FieldUpdate::Address(args.address),
        FieldUpdate::City(args.city),
        FieldUpdate::State(parse_state(&args.state)?.to_string()),
        FieldUpdate::MobileNo(args.mobile),
        FieldUpdate::TenthPercentage(args.tenth),
        FieldUpdate::TwelfthPercentage(args.twelfth),
        FieldUpdate::Degree(args.degree),
        FieldUpdate::DegreeCgpa(args.cgpa),
    ] {
        form.update_field(update);
    }
    form.select_resume(resume);

    println!("{}", form.submit_label());
    match form.submit().await {
        Some(FormMessage::Success(message)) => {
            println!("{}", message);
            Ok(())
        }
        Some(FormMessage::Failure(message)) => bail!("{}", message),
        None => bail!("Application was not submitted"),
    }
}

fn print_card(card: &VacancyCard) {
    println!("┌ {} #{}", card.title, card.job_id);
    if let Some(industry) = &card.industry {
        println!("│ {}", industry);
    }
    let mut meta: Vec<String> = Vec::new();
    if let Some(location) = &card.location {
        meta.push(location.clone());
    }
    if card.remote {
        meta.push("Remote".to_string());
    }
    meta.extend(card.employment_type.clone());
    meta.extend(card.experience_level.clone());
    if !meta.is_empty() {
        println!("│ {}", meta.join(" · "));
    }
    if let Some(salary) = &card.salary {
        let tag = if card.negotiable { " (Negotiable)" } else { "" };
        println!("│ {}{}", salary, tag);
    }
    if !card.skills.is_empty() {
        let mut skills = card.skills.join(", ");
        if let Some(more) = &card.more_skills {
            skills = format!("{} {}", skills, more);
        }
        println!("│ {}", skills);
    }
    if !card.description.is_empty() {
        println!("│ {}", card.description);
    }
    if let Some(badge) = &card.applied_badge {
        println!("│ {}", badge);
    }
    println!("└ apply: {}", Route::Apply { job_id: card.id.clone() });
}

fn print_row(card: &VacancyCard) {
    println!(
        "{:<10} {:<40} {:<24} {}",
        card.job_id,
        card.title,
        card.location.as_deref().unwrap_or(if card.remote { "Remote" } else { "-" }),
        card.applied_badge.as_deref().unwrap_or("")
    );
}

fn print_detail(detail: &VacancyDetailView) {
    println!("{} #{}", detail.title, detail.job_id);
    if let Some(industry) = &detail.industry {
        println!("Industry:     {}", industry);
    }
    if let Some(location) = &detail.location {
        let remote = if detail.remote { " (Remote)" } else { "" };
        println!("Location:     {}{}", location, remote);
    } else if detail.remote {
        println!("Location:     Remote");
    }
    if let Some(kind) = &detail.employment_type {
        println!("Type:         {}", kind);
    }
    if let Some(level) = &detail.experience_level {
        println!("Experience:   {}", level);
    }
    if let Some(salary) = &detail.salary {
        let tag = if detail.negotiable { " (Negotiable)" } else { "" };
        println!("Salary:       {}{}", salary, tag);
    }
    if let Some(deadline) = &detail.deadline {
        println!("Apply before: {}", deadline);
    }
    if !detail.skills.is_empty() {
        println!("Skills:       {}", detail.skills.join(", "));
    }
    if !detail.qualification.is_empty() {
        println!("\nQualification:\n{}", detail.qualification);
    }
    if !detail.description.is_empty() {
        println!("\n{}", detail.description);
    }
}
