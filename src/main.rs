/// Validate a form payload against a courtside schema, and optionally send it
/// to the backend through the same create flow the app uses.
///
/// Usage: formcheck <ENTITY> <FILE> [--submit]
///   FILE      : one JSON form object, or an array of objects for a batch
///   --submit  : create the records on the backend configured in the env
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtside::{
    config::Config,
    models::{
        availability::Availability,
        coach::{CoachPackage, CoachPayout},
        court::Court,
        lesson::{LessonRequest, LessonTemplate},
        note::StudentNote,
        payment::Payment,
        student::Student,
        subscription::Subscription,
    },
    services::{
        backend::RestCollection,
        collection::Collection,
        flows::{CreateFlow, RecordingNavigator, SubmitOutcome},
        memory::InMemoryCollection,
        notifications::{self, NotificationStore},
    },
    validation::FormSchema,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Entity {
    Court,
    Student,
    Subscription,
    Payment,
    Availability,
    LessonTemplate,
    LessonRequest,
    CoachPackage,
    CoachPayout,
    StudentNote,
}

#[derive(Parser)]
#[command(name = "formcheck", about = "Validate courtside form payloads")]
struct Args {
    /// Entity the payload describes
    #[arg(value_enum)]
    entity: Entity,

    /// JSON file holding the form input
    file: PathBuf,

    /// Create the records on the backend instead of in memory
    #[arg(long)]
    submit: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let text = tokio::fs::read_to_string(&args.file).await?;
    let input: Value = serde_json::from_str(&text)?;

    let saved = match args.entity {
        Entity::Court => run::<Court>(&args, &input).await?,
        Entity::Student => run::<Student>(&args, &input).await?,
        Entity::Subscription => run::<Subscription>(&args, &input).await?,
        Entity::Payment => run::<Payment>(&args, &input).await?,
        Entity::Availability => run::<Availability>(&args, &input).await?,
        Entity::LessonTemplate => run::<LessonTemplate>(&args, &input).await?,
        Entity::LessonRequest => run::<LessonRequest>(&args, &input).await?,
        Entity::CoachPackage => run::<CoachPackage>(&args, &input).await?,
        Entity::CoachPayout => run::<CoachPayout>(&args, &input).await?,
        Entity::StudentNote => run::<StudentNote>(&args, &input).await?,
    };

    if !saved {
        std::process::exit(1);
    }
    Ok(())
}

async fn run<T>(args: &Args, input: &Value) -> anyhow::Result<bool>
where
    T: FormSchema + Clone + Send + Sync + 'static,
{
    let collection: Box<dyn Collection<T>> = if args.submit {
        let config = Config::from_env()?;
        info!("Submitting {} to {}", T::PLURAL, config.backend_url);
        Box::new(RestCollection::<T>::for_schema(&config)?)
    } else {
        info!("Dry run: {} are kept in memory", T::PLURAL);
        Box::new(InMemoryCollection::<T>::new())
    };

    let store = notifications::global();
    let navigator = RecordingNavigator::new();
    let flow = CreateFlow::<T>::new(collection.as_ref(), store, &navigator);

    let outcome = match input {
        Value::Array(items) => flow.submit_batch(items).await,
        single => flow.submit(single).await,
    };

    Ok(report(&outcome, store))
}

fn report<T>(outcome: &SubmitOutcome<T>, store: &NotificationStore) -> bool {
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            println!("Invalid form:");
            for (field, messages) in errors.iter() {
                for message in messages {
                    println!("  {field}: {message}");
                }
            }
            false
        }
        SubmitOutcome::Saved(rows) => {
            println!("{}", store.snapshot().message);
            for row in rows {
                println!("  {}", row.id);
            }
            true
        }
        SubmitOutcome::Failed {
            committed,
            failed_index,
            ..
        } => {
            println!("{}", store.snapshot().message);
            if !committed.is_empty() {
                println!(
                    "  {} record(s) before item {} were saved and remain",
                    committed.len(),
                    failed_index
                );
            }
            false
        }
    }
}
