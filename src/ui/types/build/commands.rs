use crate::core::SimulationRequest;
use crate::ui::session::Command;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{ActionChoice, HistogramParameters, SimulateParameters};
use std::convert::TryFrom;
use std::path::PathBuf;

impl TryFrom<SimulateParameters> for SimulationRequest {
    type Error = BuildError;

    fn try_from(parameters: SimulateParameters) -> Result<Self, Self::Error> {
        Ok(SimulationRequest::new(parameters.tiers, parameters.trials)?)
    }
}

fn bins(parameters: &HistogramParameters) -> Result<usize, BuildError> {
    match usize::try_from(parameters.bins) {
        Ok(0) | Err(_) => Err(BuildError::InvalidParameter(
            "bins must be between 1 and usize::MAX".into(),
        )),
        Ok(n) => Ok(n),
    }
}

/// Turns a menu answer into a session command; `None` means quit.
pub fn build_command(choice: ActionChoice) -> Result<Option<Command>, BuildError> {
    let command = match choice {
        ActionChoice::Simulate(p) => {
            let chunks = p
                .chunks
                .map(|c| {
                    usize::try_from(c).map_err(|_| {
                        BuildError::InvalidParameter("chunks too large for usize".into())
                    })
                })
                .transpose()?;
            let request = SimulationRequest::try_from(p)?;
            match chunks {
                Some(chunks) if chunks > 1 => Command::SimulateParallel { request, chunks },
                _ => Command::Simulate(request),
            }
        }
        ActionChoice::Summary(_) => Command::ShowSummary,
        ActionChoice::Save(p) => {
            if p.path.trim().is_empty() {
                return Err(BuildError::InvalidParameter("path cannot be empty".into()));
            }
            Command::Save {
                path: PathBuf::from(p.path.trim()),
                format: p.format,
            }
        }
        ActionChoice::Histogram(p) => Command::Histogram { bins: bins(&p)? },
        ActionChoice::Reseed(p) => Command::Reseed(p.seed),
        ActionChoice::Quit(_) => return Ok(None),
    };
    Ok(Some(command))
}
