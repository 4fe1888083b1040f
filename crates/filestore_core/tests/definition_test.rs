use filestore_core::{CmisParameters, DriveParameters, StorageDefinition, StorageType};
use filestore_error::{DefinitionErrorKind, FilestoreErrorKind};
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn definition_kind(input: &str) -> DefinitionErrorKind {
    let err = StorageDefinition::decode(input).unwrap_err();
    match err.kind() {
        FilestoreErrorKind::Definition(e) => e.kind().clone(),
        other => panic!("expected definition error, got {}", other),
    }
}

fn archive_parameters() -> CmisParameters {
    CmisParameters::builder()
        .url("http://cmis.local/alfresco/atom")
        .repository_name("archive")
        .user_name("svc-workflow")
        .password("s3cret-pass")
        .folder("/Invoices")
        .build()
        .unwrap()
}

#[test]
fn folder_definition_round_trips() {
    let definition = StorageDefinition::decode("FOLDER:/data/files").unwrap();
    assert_eq!(*definition.storage_type(), StorageType::Folder);
    assert_eq!(definition.complement().as_deref(), Some("/data/files"));
    assert_eq!(definition.encode(), "FOLDER:/data/files");
}

#[test]
fn only_the_first_delimiter_splits() {
    let definition = StorageDefinition::decode("FOLDER:C:/data:files").unwrap();
    assert_eq!(definition.complement().as_deref(), Some("C:/data:files"));

    let url = StorageDefinition::decode("URL:https://files.example.com/pub").unwrap();
    assert_eq!(url.complement().as_deref(), Some("https://files.example.com/pub"));
    assert_eq!(url.encode(), "URL:https://files.example.com/pub");
}

#[test]
fn every_type_name_decodes() {
    for storage_type in StorageType::iter() {
        let input = match storage_type {
            StorageType::Folder => "FOLDER:/tmp".to_string(),
            StorageType::Cmis => format!(
                "CMIS:{}",
                StorageDefinition::cmis(&archive_parameters())
                    .unwrap()
                    .complement_object()
                    .clone()
                    .unwrap()
            ),
            StorageType::Json
            | StorageType::TempFolder
            | StorageType::Url
            | StorageType::DocumentStore
            | StorageType::GoogleDrive => storage_type.to_string(),
        };
        let definition = StorageDefinition::decode(&input).unwrap();
        assert_eq!(*definition.storage_type(), storage_type);
        assert_eq!(storage_type.as_str().parse::<StorageType>().unwrap(), storage_type);
    }
}

#[test]
fn type_names_are_case_sensitive() {
    assert!(matches!(
        definition_kind("folder:/data"),
        DefinitionErrorKind::UnknownType { .. }
    ));
    assert!(matches!(
        definition_kind("Json"),
        DefinitionErrorKind::UnknownType { .. }
    ));
    assert!(matches!(
        definition_kind(""),
        DefinitionErrorKind::UnknownType { .. }
    ));
}

#[test]
fn complement_free_types_ignore_trailing_text() {
    for input in ["JSON:whatever", "TEMPFOLDER:/ignored", "CAMUNDA:"] {
        let definition = StorageDefinition::decode(input).unwrap();
        assert!(definition.complement().is_none());
        assert!(definition.complement_object().is_none());
    }
    assert_eq!(StorageDefinition::decode("JSON:x").unwrap().encode(), "JSON");
}

#[test]
fn folder_requires_a_path() {
    assert!(matches!(
        definition_kind("FOLDER"),
        DefinitionErrorKind::MissingComplement(_)
    ));
    assert!(matches!(
        definition_kind("FOLDER:"),
        DefinitionErrorKind::MissingComplement(_)
    ));
}

#[test]
fn url_base_is_optional() {
    let bare = StorageDefinition::decode("URL").unwrap();
    assert!(bare.complement().is_none());
    assert_eq!(bare.encode(), "URL");
}

#[test]
fn cmis_complement_must_be_an_object() {
    assert!(matches!(
        definition_kind("CMIS"),
        DefinitionErrorKind::MissingComplement(_)
    ));
    assert!(matches!(
        definition_kind("CMIS:{not json"),
        DefinitionErrorKind::InvalidComplement { .. }
    ));
    assert!(matches!(
        definition_kind("CMIS:[1,2,3]"),
        DefinitionErrorKind::InvalidComplement { .. }
    ));
    assert!(matches!(
        definition_kind(r#"CMIS:{"url":"http://x"}"#),
        DefinitionErrorKind::InvalidComplement { .. }
    ));
}

#[test]
fn cmis_definition_is_semantically_stable() {
    let input = r#"CMIS:{"userName":"svc","password":"pw","repositoryName":"archive","url":"http://cmis.local/atom"}"#;
    let decoded = StorageDefinition::decode(input).unwrap();
    let again = StorageDefinition::decode(&decoded.encode()).unwrap();

    assert_eq!(decoded, again);
    assert_eq!(again.cmis_parameters().unwrap().user_name(), "svc");
    assert!(again.cmis_parameters().unwrap().folder().is_none());
}

#[test]
fn cmis_description_hides_password() {
    let definition = StorageDefinition::cmis(&archive_parameters()).unwrap();
    let summary = definition.describe();

    assert!(summary.contains("http://cmis.local/alfresco/atom"));
    assert!(summary.contains("archive"));
    assert!(summary.contains("svc-workflow"));
    assert!(!summary.contains("s3cret-pass"));
    assert!(!format!("{:?}", definition).contains("s3cret-pass"));
}

#[test]
fn drive_definition_accepts_optional_parameters() {
    let bare = StorageDefinition::decode("GOOGLEDRIVE").unwrap();
    assert!(bare.drive_parameters().unwrap().folder_id().is_none());

    let scoped = StorageDefinition::decode(r#"GOOGLEDRIVE:{"folderId":"0BxFolder"}"#).unwrap();
    assert_eq!(
        scoped.drive_parameters().unwrap().folder_id().as_deref(),
        Some("0BxFolder")
    );
    assert_eq!(StorageDefinition::decode(&scoped.encode()).unwrap(), scoped);

    assert!(matches!(
        definition_kind("GOOGLEDRIVE:folder"),
        DefinitionErrorKind::InvalidComplement { .. }
    ));
}

#[test]
fn drive_constructor_matches_decoded_form() {
    let built =
        StorageDefinition::google_drive(&DriveParameters::default().with_folder_id("0BxFolder"))
            .unwrap();
    let decoded = StorageDefinition::decode(r#"GOOGLEDRIVE:{"folderId":"0BxFolder"}"#).unwrap();
    assert_eq!(built, decoded);

    let unscoped = StorageDefinition::google_drive(&DriveParameters::default()).unwrap();
    assert_eq!(unscoped.encode(), "GOOGLEDRIVE");
}

#[test]
fn credential_is_never_encoded() {
    let definition = StorageDefinition::decode("GOOGLEDRIVE")
        .unwrap()
        .with_credential("{\"private_key\":\"-----BEGIN KEY-----\"}");

    assert_eq!(definition.encode(), "GOOGLEDRIVE");
    assert!(!definition.describe().contains("BEGIN KEY"));
    assert!(definition.describe().contains("credential=[provided]"));
    assert!(!format!("{:?}", definition).contains("BEGIN KEY"));
    assert_eq!(definition, StorageDefinition::decode("GOOGLEDRIVE").unwrap());
}

#[test]
fn default_definition_is_json() {
    assert_eq!(StorageDefinition::default().encode(), "JSON");
    let parsed: StorageDefinition = "TEMPFOLDER".parse().unwrap();
    assert_eq!(parsed, StorageDefinition::temp_folder());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_folder_definitions_round_trip(path in "[ -~]{1,60}") {
        let input = format!("FOLDER:{}", path);
        let definition = StorageDefinition::decode(&input).unwrap();
        prop_assert_eq!(definition.encode(), input);
    }

    #[test]
    fn prop_url_definitions_round_trip(base in "[ -~]{0,60}") {
        let input = format!("URL:{}", base);
        let definition = StorageDefinition::decode(&input).unwrap();
        prop_assert_eq!(definition.encode(), input);
    }

    #[test]
    fn prop_cmis_definitions_are_idempotent(
        url in "https?://[a-z]{1,12}\\.[a-z]{2,3}/[a-z/]{0,20}",
        repository in "[A-Za-z0-9 _-]{1,20}",
        user in "[A-Za-z0-9._@-]{1,20}",
        password in "[ -~]{0,20}",
    ) {
        let parameters = CmisParameters::builder()
            .url(url)
            .repository_name(repository)
            .user_name(user)
            .password(password)
            .build()
            .unwrap();
        let first = StorageDefinition::decode(&StorageDefinition::cmis(&parameters).unwrap().encode()).unwrap();
        let second = StorageDefinition::decode(&first.encode()).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(second.cmis_parameters().unwrap(), parameters);
    }

    #[test]
    fn prop_unknown_prefixes_are_rejected(prefix in "[a-z]{1,12}") {
        let encoded = format!("{}:x", prefix);
        prop_assert!(StorageDefinition::decode(&encoded).is_err());
    }
}
