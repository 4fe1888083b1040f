//! Save, load, purge and describe command handlers.

use filestore::{FileRepository, FileVariableReference, FilestoreConfig, StorageDefinition};
use std::error::Error;
use std::path::Path;

type CliResult = Result<(), Box<dyn Error>>;

/// Save `file` and print the reference JSON.
#[tracing::instrument(skip_all, fields(file = %file.display()))]
pub fn save_file(
    config: &FilestoreConfig,
    file: &Path,
    storage: Option<&str>,
    name: Option<String>,
    mime: Option<String>,
) -> CliResult {
    let definition = match storage {
        Some(encoded) => StorageDefinition::decode(encoded)?,
        None => config.default_definition()?,
    };
    let name = name
        .or_else(|| file.file_name().map(|n| n.to_string_lossy().into_owned()))
        .ok_or_else(|| format!("{} has no file name, pass --name", file.display()))?;
    let bytes = std::fs::read(file)?;

    let repository = FileRepository::new();
    let mut variable = repository
        .create_file_variable(Some(definition))
        .with_name(name)
        .with_value(bytes);
    if let Some(mime) = mime {
        variable = variable.with_mime_type(mime);
    }

    let context = config.storage_context()?;
    match repository.save_file_variable(Some(&variable), &context)? {
        Some(reference) => {
            println!("{}", reference.to_json()?);
            Ok(())
        }
        None => Err("nothing was saved".into()),
    }
}

/// Load `reference` and write its bytes to `output`.
#[tracing::instrument(skip_all, fields(output = %output.display()))]
pub fn load_file(config: &FilestoreConfig, reference: &str, output: &Path) -> CliResult {
    let reference = read_reference(reference)?;
    let context = config.storage_context()?;

    let Some(variable) = FileRepository::new().load_file_variable(Some(&reference), &context)?
    else {
        return Err(format!("{} has no content to load", reference.describe()).into());
    };
    std::fs::write(output, variable.value())?;
    println!(
        "{}\t{}",
        variable.name(),
        variable.mime_type().as_deref().unwrap_or("-")
    );
    Ok(())
}

/// Purge `reference` and print whether the artifact is gone.
#[tracing::instrument(skip_all)]
pub fn purge_file(config: &FilestoreConfig, reference: &str) -> CliResult {
    let reference = read_reference(reference)?;
    let context = config.storage_context()?;

    let purged = FileRepository::new().purge_file_variable(Some(&reference), &context)?;
    println!("{}", purged);
    Ok(())
}

/// Print the redacted summary of an encoded definition.
pub fn describe_definition(encoded: &str) -> CliResult {
    let definition = StorageDefinition::decode(encoded)?;
    println!("{}", definition.describe());
    Ok(())
}

// `@path` reads the reference from a file, anything else is the JSON itself.
fn read_reference(argument: &str) -> Result<FileVariableReference, Box<dyn Error>> {
    let text = match argument.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => argument.to_string(),
    };
    Ok(FileVariableReference::from_json(text.trim())?)
}
