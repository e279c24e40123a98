use std::path::Path;

use authchain::chain::{StepOutcome, StepReport};
use authchain::credential::LoginRequest;
use authchain::error::{AuthChainError, Result};

use crate::cli::common;
use crate::cli::json_output::CheckResponse;

pub fn run(
    config: Option<&Path>,
    principal: &str,
    password_stdin: bool,
    origin: Option<&str>,
    trace: bool,
    json: bool,
) -> Result<()> {
    let manager = common::load_manager(config)?;
    let password = common::read_password(
        password_stdin,
        &format!("Password for {}", principal),
        false,
    )?;

    let mut request = LoginRequest::new(principal, password.as_str());
    if let Some(origin) = origin {
        request = request.with_origin(origin);
    }

    let evaluation = match manager.authenticate_traced(Some(&request)) {
        Some(evaluation) => evaluation,
        None => return Err(AuthChainError::NoDecision(principal.to_string())),
    };

    if trace && !json {
        for step in &evaluation.steps {
            eprintln!("{}", describe_step(step));
        }
    }
    let steps = trace.then(|| evaluation.steps.clone());

    let result = evaluation.into_result()?;
    if !result.authenticated {
        return Err(AuthChainError::NoDecision(principal.to_string()));
    }

    if json {
        let response = CheckResponse {
            principal: result.principal.clone(),
            authenticated: true,
            authorities: result.authority_names(),
            steps,
        };
        println!(
            "{}",
            serde_json::to_string(&response)
                .map_err(|e| AuthChainError::Serialization(e.to_string()))?
        );
    } else {
        println!("Authenticated '{}'", result.principal);
        let authorities = result.authority_names();
        if authorities.is_empty() {
            println!("Authorities: (none)");
        } else {
            println!("Authorities: {}", authorities.join(", "));
        }
    }

    Ok(())
}

fn describe_step(step: &StepReport) -> String {
    let status = match &step.outcome {
        StepOutcome::Skipped => "skipped".to_string(),
        StepOutcome::Succeeded => "succeeded".to_string(),
        StepOutcome::Abstained => "abstained".to_string(),
        StepOutcome::Rejected { message, .. } => format!("rejected ({})", message),
    };
    format!(
        "[{}] {} ({}): {}",
        step.index, step.provider, step.condition, status
    )
}
