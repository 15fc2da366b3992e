use std::{
    io::{Write, stdout},
    process::ExitCode,
    time::Duration,
};

use clap::Parser;
use client::{
    Controller, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS, FormView, HttpPredictor, ResultState,
    SubmitError,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin, stdin};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Age in years, runs a single prediction together with --salary
    #[arg(long)]
    age: Option<String>,

    /// Annual salary, grouping commas allowed
    #[arg(long)]
    salary: Option<String>,

    /// Endpoint override, also the prompt default in interactive mode
    #[arg(long)]
    api_url: Option<String>,

    #[arg(long, env = "PREDICT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: Url,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let predictor = HttpPredictor::new(Duration::from_millis(args.timeout_ms))?;
    let mut controller = Controller::new(predictor, args.endpoint);

    let api_url = args.api_url.unwrap_or_default();
    controller.form_mut().set_api_url(&api_url);

    match (args.age, args.salary) {
        (Some(age), Some(salary)) => one_shot(&mut controller, &age, &salary).await,
        _ => interactive(&mut controller, &api_url).await,
    }
}

async fn one_shot(
    controller: &mut Controller<HttpPredictor>,
    age: &str,
    salary: &str,
) -> anyhow::Result<ExitCode> {
    controller.form_mut().set_age(age);
    controller.form_mut().set_salary(salary);

    match controller.submit().await {
        Ok(state) => {
            println!("{state}");
            Ok(match state {
                ResultState::Success(_) => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Err(SubmitError::Invalid(errors)) => {
            print!(
                "{}",
                FormView {
                    form: controller.form(),
                    errors: Some(&errors),
                }
            );
            Ok(ExitCode::from(2))
        }
        Err(e) => Err(e.into()),
    }
}

async fn interactive(
    controller: &mut Controller<HttpPredictor>,
    preset_api_url: &str,
) -> anyhow::Result<ExitCode> {
    let mut input = BufReader::new(stdin()).lines();

    println!("{}\n", controller.state());

    loop {
        let Some(age) = prompt(&mut input, "Age: ").await? else {
            break;
        };
        controller.form_mut().set_age(&age);

        let Some(salary) = prompt(&mut input, "Annual Salary: ").await? else {
            break;
        };
        controller.form_mut().set_salary(&salary);

        let hint = endpoint_hint(controller.default_endpoint(), preset_api_url);
        let Some(api_url) = prompt(&mut input, &hint).await? else {
            break;
        };
        controller.form_mut().set_api_url(or_preset(&api_url, preset_api_url));

        let submission = match controller.begin_submit() {
            Ok(submission) => submission,
            Err(SubmitError::Invalid(_)) => {
                print!(
                    "\n{}\n",
                    FormView {
                        form: controller.form(),
                        errors: controller.field_errors(),
                    }
                );
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        println!("\n{}\n", controller.state());
        println!("{}\n", controller.send(submission).await);

        let again = match controller.state() {
            ResultState::Error(_) => "Try again? [Y/n]: ",
            _ => "Predict again? [Y/n]: ",
        };
        let answer = prompt(&mut input, again).await?.unwrap_or_default();
        if answer.trim().eq_ignore_ascii_case("n") {
            break;
        }

        controller.reset();
        println!("\n{}\n", controller.state());
    }

    Ok(ExitCode::SUCCESS)
}

fn endpoint_hint(default_endpoint: &Url, preset_api_url: &str) -> String {
    if preset_api_url.is_empty() {
        format!("API Endpoint [{default_endpoint}]: ")
    } else {
        format!("API Endpoint [{preset_api_url}]: ")
    }
}

/// Blank answers keep the `--api-url` value.
fn or_preset<'a>(answer: &'a str, preset_api_url: &'a str) -> &'a str {
    if answer.trim().is_empty() {
        preset_api_url
    } else {
        answer
    }
}

async fn prompt(input: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    stdout().flush()?;

    Ok(input.next_line().await?)
}
