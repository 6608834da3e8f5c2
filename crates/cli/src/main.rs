use clap::{Parser, Subcommand};
use patientor_core::{
    validate_new_entry, validate_new_patient, CoreConfig, DiagnosisCatalogue, PatientRepository,
    UuidGenerator,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "patientor")]
#[command(about = "Patientor patient record CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a new-patient JSON payload
    ValidatePatient {
        /// Path to the JSON file
        file: PathBuf,
    },
    /// Validate a new-entry JSON payload
    ValidateEntry {
        /// Path to the JSON file
        file: PathBuf,
    },
    /// List the bundled seed patients (identity codes omitted)
    List,
    /// List the diagnosis catalogue
    Diagnoses,
}

fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| format!("{} is not valid JSON: {}", path.display(), e))?;
    Ok(value)
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::ValidatePatient { file }) => {
            let input = read_json(&file)?;
            match validate_new_patient(&input) {
                Ok(patient) => println!("{}", serde_json::to_string_pretty(&patient)?),
                Err(e) => {
                    eprintln!("Invalid patient: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(Commands::ValidateEntry { file }) => {
            let input = read_json(&file)?;
            match validate_new_entry(&input) {
                Ok(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
                Err(e) => {
                    eprintln!("Invalid entry: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Some(Commands::List) => {
            let ids = Arc::new(UuidGenerator::new());
            let repo = PatientRepository::from_config(&CoreConfig::default(), ids)?;
            let patients = repo.list_non_sensitive();
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    println!(
                        "ID: {}, Name: {}, Born: {}, Gender: {}, Occupation: {}, Entries: {}",
                        patient.id,
                        patient.name,
                        patient.date_of_birth,
                        patient.gender,
                        patient.occupation,
                        patient.entries.len()
                    );
                }
            }
        }
        Some(Commands::Diagnoses) => {
            let catalogue = DiagnosisCatalogue::bundled()?;
            for diagnosis in catalogue.list_all() {
                match &diagnosis.latin {
                    Some(latin) => println!("{}: {} ({})", diagnosis.code, diagnosis.name, latin),
                    None => println!("{}: {}", diagnosis.code, diagnosis.name),
                }
            }
        }
        None => {
            println!("Use 'patientor --help' for commands");
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_validate_entry() {
        let cli = Cli::try_parse_from(["patientor", "validate-entry", "entry.json"]).unwrap();
        match cli.command {
            Some(Commands::ValidateEntry { file }) => assert_eq!(file, Path::new("entry.json")),
            _ => panic!("expected validate-entry"),
        }
    }

    #[test]
    fn test_read_json_reports_bad_json() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "{{ not json").unwrap();

        let err = read_json(file.path()).expect_err("should fail");
        assert!(err.to_string().contains("is not valid JSON"));
    }

    #[test]
    fn test_read_json_then_validate() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(
            file,
            r#"{{"type": "Hospital", "date": "2015-01-02", "specialist": "MD House",
               "description": "Thumb fracture"}}"#
        )
        .unwrap();

        let value = read_json(file.path()).unwrap();
        assert!(validate_new_entry(&value).is_ok());
    }
}
