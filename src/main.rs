//! Underwriting Engine CLI
//!
//! Runs the questionnaire simulator against the question library and model registry

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use underwriting_engine::{
    catalog::{load_questions, parse_answer_values, replace_question_by_id, save_questions},
    models::{load_models, parse_questions_included, replace_model_by_id, save_models},
    AnswerFormat, DerivedState, ModelRegistry, Question, QuestionCatalog, Simulator, SimulatorConfig,
    UnderwritingModel,
};

#[derive(Parser, Debug)]
#[command(
    name = "underwriting_engine",
    about = "Simulate underwriting questionnaires against product underwriting models",
    version
)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct DataArgs {
    /// JSON config file (paths and bootstrap model)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the question library file
    #[arg(long, global = true)]
    questions: Option<PathBuf>,
    /// Override the underwriting model registry file
    #[arg(long, global = true)]
    models: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer questions and print visible questions, loadings and decisions
    Simulate(SimulateArgs),
    /// List questionnaire categories in library order
    Categories,
    /// List library questions, optionally filtered by a search term
    Questions(SearchArgs),
    /// List underwriting models, optionally filtered by a search term
    Models(SearchArgs),
    /// Edit one question by Id and rewrite the question library
    EditQuestion(EditQuestionArgs),
    /// Edit one underwriting model by Id and rewrite the model registry
    EditModel(EditModelArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Case-insensitive text matched against every field
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(Args, Debug, Default)]
struct EditQuestionArgs {
    #[arg(long)]
    id: i64,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    number: Option<f64>,
    #[arg(long)]
    text: Option<String>,
    /// Answer format label, e.g. "Yes/No" or "Multiple Choice"
    #[arg(long)]
    format: Option<String>,
    /// Comma-separated answer values
    #[arg(long)]
    values: Option<String>,
    #[arg(long)]
    loading: Option<f64>,
    /// Decision text; an empty value removes the decision
    #[arg(long)]
    decision: Option<String>,
}

impl EditQuestionArgs {
    fn apply(&self, question: &mut Question) {
        if let Some(category) = &self.category {
            question.category = category.clone();
        }
        if let Some(number) = self.number {
            question.question_number = number;
        }
        if let Some(text) = &self.text {
            question.question_text = text.clone();
        }
        if let Some(format) = &self.format {
            question.answer_format = AnswerFormat::from(format.as_str());
        }
        if let Some(values) = &self.values {
            question.answer_values = parse_answer_values(values);
        }
        if let Some(loading) = self.loading {
            question.em_loading = loading;
        }
        if let Some(decision) = &self.decision {
            question.decision = Some(decision.clone()).filter(|text| !text.trim().is_empty());
        }
    }
}

#[derive(Args, Debug, Default)]
struct EditModelArgs {
    #[arg(long)]
    id: i64,
    #[arg(long)]
    tenant: Option<String>,
    #[arg(long)]
    currency: Option<String>,
    #[arg(long)]
    product: Option<String>,
    #[arg(long)]
    min_age: Option<u32>,
    #[arg(long)]
    max_age: Option<u32>,
    #[arg(long)]
    min_sum_assured: Option<f64>,
    #[arg(long)]
    max_sum_assured: Option<f64>,
    /// Comma-separated main question numbers; entries that are not integers are dropped
    #[arg(long)]
    questions_included: Option<String>,
}

impl EditModelArgs {
    fn apply(&self, model: &mut UnderwritingModel) {
        if let Some(tenant) = &self.tenant {
            model.tenant = tenant.clone();
        }
        if let Some(currency) = &self.currency {
            model.currency = currency.clone();
        }
        if let Some(product) = &self.product {
            model.product = product.clone();
        }
        if let Some(age) = self.min_age {
            model.minimum_age = age;
        }
        if let Some(age) = self.max_age {
            model.maximum_age = age;
        }
        if let Some(sum) = self.min_sum_assured {
            model.minimum_sum_assured = sum;
        }
        if let Some(sum) = self.max_sum_assured {
            model.maximum_sum_assured = sum;
        }
        if let Some(questions) = &self.questions_included {
            model.questions_included = parse_questions_included(questions);
        }
    }
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Underwriting model Id to select (clears any answers given before it)
    #[arg(long)]
    model: Option<i64>,
    /// Answer as QUESTION_ID=VALUE; repeat for more answers, applied in order
    #[arg(long = "answer", value_parser = parse_answer)]
    answers: Vec<(i64, String)>,
    /// Print the derived state as JSON
    #[arg(long)]
    json: bool,
}

fn parse_answer(arg: &str) -> Result<(i64, String), String> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION_ID=VALUE, got {arg:?}"))?;
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("question Id {id:?} is not an integer"))?;
    Ok((id, value.to_string()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = resolve_config(&cli.data)?;

    match cli.command {
        Command::Simulate(args) => {
            let (catalog, registry) = load_data(&config);
            simulate(catalog, registry, &config, args)
        }
        Command::Categories => {
            let (catalog, _) = load_data(&config);
            list_categories(&catalog);
            Ok(())
        }
        Command::Questions(args) => {
            let (catalog, _) = load_data(&config);
            list_questions(&catalog, &args.search);
            Ok(())
        }
        Command::Models(args) => {
            let (_, registry) = load_data(&config);
            list_models(&registry, &args.search);
            Ok(())
        }
        Command::EditQuestion(args) => edit_question(&config, &args),
        Command::EditModel(args) => edit_model(&config, &args),
    }
}

/// Replace the question's row and rewrite the whole library
fn edit_question(config: &SimulatorConfig, args: &EditQuestionArgs) -> Result<()> {
    let path = &config.questions_path;
    let mut questions = load_questions(path)?;
    let mut question = questions
        .iter()
        .find(|question| question.id == args.id)
        .cloned()
        .with_context(|| format!("No question with Id {} in {}", args.id, path.display()))?;

    args.apply(&mut question);
    replace_question_by_id(&mut questions, question);
    save_questions(path, &questions)?;
    println!("Updated question {} in {}", args.id, path.display());
    Ok(())
}

/// Replace the model's row and rewrite the whole registry
fn edit_model(config: &SimulatorConfig, args: &EditModelArgs) -> Result<()> {
    let path = &config.models_path;
    let mut models = load_models(path)?;
    let mut model = models
        .iter()
        .find(|model| model.id == args.id)
        .cloned()
        .with_context(|| format!("No underwriting model with Id {} in {}", args.id, path.display()))?;

    args.apply(&mut model);
    replace_model_by_id(&mut models, model);
    save_models(path, &models)?;
    println!("Updated underwriting model {} in {}", args.id, path.display());
    Ok(())
}

fn resolve_config(args: &DataArgs) -> Result<SimulatorConfig> {
    let mut config = match &args.config {
        Some(path) => SimulatorConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => SimulatorConfig::default(),
    };
    if let Some(path) = &args.questions {
        config.questions_path = path.clone();
    }
    if let Some(path) = &args.models {
        config.models_path = path.clone();
    }
    Ok(config)
}

/// Load failures are reported and the run continues with empty data
fn load_data(config: &SimulatorConfig) -> (QuestionCatalog, ModelRegistry) {
    let catalog = match load_questions(&config.questions_path) {
        Ok(questions) => QuestionCatalog::new(questions),
        Err(err) => {
            log::error!("Error loading questions: {}", err);
            QuestionCatalog::empty()
        }
    };
    let registry = match load_models(&config.models_path) {
        Ok(models) => ModelRegistry::new(models),
        Err(err) => {
            log::error!("Error loading underwriting models: {}", err);
            ModelRegistry::empty()
        }
    };
    (catalog, registry)
}

fn simulate(
    catalog: QuestionCatalog,
    registry: ModelRegistry,
    config: &SimulatorConfig,
    args: SimulateArgs,
) -> Result<()> {
    let mut sim = Simulator::with_bootstrap(catalog, registry, config.bootstrap_model_id);

    if let Some(id) = args.model {
        sim.select_model(id)?;
    }
    for (question_id, value) in &args.answers {
        sim.set_answer(*question_id, value)?;
    }

    let state = sim.derived_state();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    match sim.selected_model() {
        Some(model) => println!("Underwriting model: {} [{}]", model.label(), model.id),
        None => println!("Underwriting model: none (all questions)"),
    }
    print_state(&sim, &state);
    Ok(())
}

fn print_state(sim: &Simulator, state: &DerivedState) {
    let answer_text = |id: i64| {
        sim.session()
            .get(id)
            .map(|value| value.as_text())
            .unwrap_or_else(|| "-".to_string())
    };

    for view in &state.visible_questions_by_category {
        println!("\n{}", view.category);
        println!("{}", "-".repeat(view.category.len()));
        for visible in &view.questions {
            let question = &visible.question;
            println!("{:<70} {}", question.display_label(), answer_text(question.id));
            for sub in &visible.sub_questions {
                println!("    {:<66} {}", sub.display_label(), answer_text(sub.id));
            }
        }
    }

    println!("\nLoadings:");
    for (category, loading) in &state.by_category_loading {
        println!("  {:<30} {:>8.2}", category, loading);
    }
    println!("  {:<30} {:>8.2}", "Total", state.total_loading);

    if state.decisions.is_empty() {
        println!("\nDecisions: none");
    } else {
        println!("\nDecisions:");
        for decision in &state.decisions {
            println!("  {}. {} => {}", decision.question_number, decision.question_text, decision.decision);
        }
    }
}

fn list_categories(catalog: &QuestionCatalog) {
    for category in catalog.categories() {
        let count = catalog.iter().filter(|q| q.category == category).count();
        println!("{:<30} {:>4} questions", category, count);
    }
}

fn list_questions(catalog: &QuestionCatalog, search: &str) {
    println!("{:>4}  {:<16} {:<60} {:<16} {:>8}  Decision", "Id", "Category", "Question", "Format", "Loading");
    for question in catalog.search(search) {
        println!(
            "{:>4}  {:<16} {:<60} {:<16} {:>8.2}  {}",
            question.id,
            question.category,
            question.display_label(),
            question.answer_format.as_str(),
            question.em_loading,
            question.decision_text().unwrap_or("-"),
        );
    }
}

fn list_models(registry: &ModelRegistry, search: &str) {
    println!("{:>4}  {:<40} {:>9} {:>16}  Questions", "Id", "Model", "Ages", "Sum assured");
    for model in registry.search(search) {
        let questions: Vec<String> = model.questions_included.iter().map(|n| n.to_string()).collect();
        println!(
            "{:>4}  {:<40} {:>4}-{:<4} {:>7.0}-{:<8.0}  {}",
            model.id,
            model.label(),
            model.minimum_age,
            model.maximum_age,
            model.minimum_sum_assured,
            model.maximum_sum_assured,
            questions.join(", "),
        );
    }
}
