use clap::{Parser, Subcommand};
use fitquiz_core::config::TimingConfig;
use fitquiz_core::units::cm_to_feet_inches;
use fitquiz_core::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "fitquiz")]
#[command(about = "Clothing and shoe size finder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the size quiz interactively (default)
    Quiz {
        /// Skip the transition and calculating pauses
        #[arg(long)]
        no_delay: bool,

        /// Print the final result as JSON and exit
        #[arg(long)]
        json: bool,

        /// Word the results for a product (polo, t-shirt, trousers, midlayer, hoodie)
        #[arg(long)]
        product: Option<ProductType>,
    },

    /// Estimate sizes directly from measurements
    Estimate {
        /// male or female
        #[arg(long)]
        gender: Gender,

        /// Height in centimeters
        #[arg(long)]
        height: f64,

        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Age in years
        #[arg(long)]
        age: Option<f64>,

        /// Belly shape (flatter, average, rounded)
        #[arg(long)]
        belly: Option<BellyShape>,

        /// Chest shape (slimmer, average, broader)
        #[arg(long)]
        chest: Option<ChestShape>,

        /// Product type (polo, t-shirt, trousers, midlayer, hoodie)
        #[arg(long)]
        product: Option<ProductType>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the height picker options
    Heights,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Quiz { .. }) => fitquiz_core::logging::init_interactive(),
        Some(_) => fitquiz_core::logging::init(),
    }

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Quiz {
            no_delay,
            json,
            product,
        }) => cmd_quiz(config, no_delay, json, product),
        Some(Commands::Estimate {
            gender,
            height,
            weight,
            age,
            belly,
            chest,
            product,
            json,
        }) => {
            let data = QuizData {
                gender: Some(gender),
                height,
                weight,
                age: age.unwrap_or(config.defaults.age),
                belly_shape: belly,
                chest_shape: chest,
                product_type: product,
            };
            cmd_estimate(&data, json)
        }
        Some(Commands::Heights) => cmd_heights(&config),
        None => {
            // Default to the interactive quiz
            cmd_quiz(config, false, false, None)
        }
    }
}

fn cmd_quiz(
    mut config: Config,
    no_delay: bool,
    json: bool,
    product: Option<ProductType>,
) -> Result<()> {
    if no_delay {
        config.timing = TimingConfig::immediate();
    }

    let mut machine = QuizMachine::from_config(config)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match machine.screen() {
            Screen::Welcome => {
                display_welcome();
                if read_answer(&mut lines)?.is_none() {
                    return Ok(());
                }
                machine.start_quiz();
                if let Some(product) = product {
                    machine.select_product_type(product);
                }
            }

            Screen::Quiz => {
                display_step(&machine);
                let input = match read_answer(&mut lines)? {
                    Some(input) => input,
                    None => {
                        println!("\nQuiz abandoned.");
                        return Ok(());
                    }
                };

                let outcome = answer_step(&mut machine, &input);
                settle(&mut machine, outcome);
            }

            Screen::Calculating => {
                // Only reachable if a calculation timer is still outstanding
                match machine.pending_timer().cloned() {
                    Some(timer) => wait_and_fire(&mut machine, &timer),
                    None => machine.restart_quiz(),
                }
            }

            Screen::Results => {
                if let Some(result) = machine.result() {
                    display_results(result, json)?;
                }
                if json {
                    return Ok(());
                }

                println!("Start over? [y/N]");
                match read_answer(&mut lines)? {
                    Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                        machine.restart_quiz();
                    }
                    _ => return Ok(()),
                }
            }
        }
    }
}

fn cmd_estimate(data: &QuizData, json: bool) -> Result<()> {
    let result = compute_sizes(data);
    tracing::info!(
        "Estimated sizes for BMI {:.1}",
        bmi(data.height, data.weight)
    );
    display_results(&result, json)
}

fn cmd_heights(config: &Config) -> Result<()> {
    let loaded;
    let reference = match config.reference.path {
        Some(ref path) => {
            loaded = ReferenceData::load_from(path)?;
            &loaded
        }
        None => get_default_reference(),
    };

    for option in &reference.height_options {
        println!("{}", option.label);
    }
    Ok(())
}

/// Feed one line of input to the active step
fn answer_step(machine: &mut QuizMachine, input: &str) -> StepOutcome {
    match machine.step() {
        QuizStep::Gender => {
            let gender = match input.trim().to_ascii_lowercase().as_str() {
                "m" => Some(Gender::Male),
                "f" => Some(Gender::Female),
                other => pick(other, &Gender::ALL),
            };
            match gender {
                Some(gender) => machine.select_gender(gender),
                None => StepOutcome::Blocked(BlockReason::NoSelection),
            }
        }
        QuizStep::Height => {
            machine.enter_height(input);
            machine.continue_step()
        }
        QuizStep::Weight => {
            machine.enter_weight(input);
            machine.continue_step()
        }
        QuizStep::Age => {
            machine.enter_age(input);
            machine.continue_step()
        }
        QuizStep::BellyShape => match pick(input, &BellyShape::ALL) {
            Some(shape) => machine.select_belly_shape(shape),
            None => StepOutcome::Blocked(BlockReason::NoSelection),
        },
        QuizStep::ChestShape => match pick(input, &ChestShape::ALL) {
            Some(shape) => machine.select_chest_shape(shape),
            None => StepOutcome::Blocked(BlockReason::NoSelection),
        },
    }
}

/// Accept a 1-based option number or an option key
fn pick<T: Copy + FromStr>(input: &str, options: &[T]) -> Option<T> {
    let trimmed = input.trim();
    if let Ok(number) = trimmed.parse::<usize>() {
        return number.checked_sub(1).and_then(|i| options.get(i).copied());
    }
    trimmed.parse::<T>().ok()
}

/// Run out any timer the outcome scheduled and report blocked input
fn settle(machine: &mut QuizMachine, outcome: StepOutcome) {
    match outcome {
        StepOutcome::Scheduled(timer) => wait_and_fire(machine, &timer),
        StepOutcome::Blocked(reason) => println!("\n  ✗ {}\n", block_message(machine, reason)),
        StepOutcome::Advanced | StepOutcome::Updated | StepOutcome::Ignored => {}
    }
}

fn wait_and_fire(machine: &mut QuizMachine, timer: &Timer) {
    if timer.kind == TimerKind::FinishCalculation {
        println!("\nCalculating your sizes...");
    }
    std::thread::sleep(timer.delay);
    machine.fire(timer.handle);
}

fn block_message(machine: &QuizMachine, reason: BlockReason) -> String {
    match reason {
        BlockReason::NoSelection => "Please pick one of the listed options.".into(),
        BlockReason::GenderUnset => "Please select a gender in step 1 first.".into(),
        BlockReason::InvalidEntry => "Please enter a number.".into(),
        BlockReason::OutOfRange => match machine.step_input() {
            StepInput::Numeric { unit, range, .. } => format!(
                "Please enter a value between {} and {} {}.",
                range.min, range.max, unit
            ),
            StepInput::Choice => "Please pick one of the listed options.".into(),
        },
    }
}

fn display_welcome() {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  FIND YOUR FIT");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Answer {} quick questions to get your", TOTAL_QUIZ_STEPS);
    println!("  clothing and shoe size recommendations.");
    println!();
    println!("Press Enter to start");
}

fn display_step(machine: &QuizMachine) {
    let progress = machine.progress();
    let step = machine.step();

    println!("─────────────────────────────────────────");
    println!(
        "Step {} of {} ({}% complete)",
        progress.current,
        progress.total,
        progress.percent()
    );
    println!();
    println!("  {}", step.title());
    if let Some(subtitle) = step.subtitle() {
        println!("  {}", subtitle);
    }
    println!();

    match step {
        QuizStep::Gender => {
            for (i, gender) in Gender::ALL.iter().enumerate() {
                println!("  {}) {}", i + 1, gender.label());
            }
        }
        QuizStep::BellyShape | QuizStep::ChestShape => {
            let options = step
                .shape_kind()
                .and_then(|kind| machine.shape_options(kind));
            match options {
                Some(options) => {
                    for (i, option) in options.iter().enumerate() {
                        println!("  {}) {} - {}", i + 1, option.label, option.description);
                    }
                }
                None => println!("  Please select a gender in step 1 first."),
            }
        }
        QuizStep::Height | QuizStep::Weight | QuizStep::Age => {
            if let StepInput::Numeric { unit, range, .. } = machine.step_input() {
                // An empty entry applies the configured default, not the last value
                let defaults = &machine.config().defaults;
                let default = match step {
                    QuizStep::Height => defaults.height,
                    QuizStep::Weight => defaults.weight,
                    _ => defaults.age,
                };
                println!(
                    "  Enter {} between {} and {} (Enter uses {})",
                    unit, range.min, range.max, default
                );
                if step == QuizStep::Height {
                    println!("  {} cm is {}", default, cm_to_feet_inches(default));
                }
            }
        }
    }
}

fn display_results(result: &SizeResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  YOUR SIZE RECOMMENDATIONS");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Top size:     {}  (estimated for your chest)", result.top_size);
    println!("  Bottom size:  {}  (estimated for your waist)", result.bottom_size);
    println!(
        "  Shoe size:    UK {} / EU {}",
        result.shoe_size_uk, result.shoe_size_eu
    );
    println!("  Fit:          {}", result.fit_recommendation);
    println!("                {}", result.fit_description);

    if let Some(product) = result.product_recommendation() {
        println!();
        println!("  → {}", product.message);
    }

    println!();
    Ok(())
}

/// Prompt and read one line; `None` at end of input
fn read_answer<I>(lines: &mut I) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("> ");
    io::stdout().flush()?;

    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}
