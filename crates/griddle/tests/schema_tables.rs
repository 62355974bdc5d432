use griddle::schema::app::{Constraint, DatabaseHandle, ScalarType, SchemaHandle};
use griddle::schema::def::{FieldDef, ModelDef};
use griddle::schema::Builder;

use pretty_assertions::assert_eq;

fn storage() -> (SchemaHandle, DatabaseHandle) {
    (SchemaHandle::new("registry"), DatabaseHandle::new("pool"))
}

fn column_names(schema: &griddle::Schema, table: &str) -> Vec<String> {
    schema
        .table_by_name(table)
        .unwrap()
        .columns
        .iter()
        .map(|column| column.name.clone())
        .collect()
}

#[test]
fn columns_follow_merge_order_and_renames() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("DateFieldsModel")
            .abstract_model()
            .metadata(metadata)
            .database(database)
            .field(FieldDef::scalar("created_date", ScalarType::DateTime).column("creation_date"))
            .field(
                FieldDef::scalar("updated_date", ScalarType::DateTime)
                    .column("modification_date"),
            ),
    );
    builder.register(
        ModelDef::new("RedefinedField")
            .base("DateFieldsModel")
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::scalar("created_date", ScalarType::String).column("creation_date")),
    );

    let schema = builder.build().unwrap();

    assert_eq!(
        column_names(&schema, "redefinedfields"),
        ["creation_date", "modification_date", "id"]
    );

    let table = schema.table_by_name("redefinedfields").unwrap();
    let created = table.column_by_name("creation_date").unwrap();
    assert_eq!(created.ty, ScalarType::String);
    assert!(!created.primary_key);
    assert_eq!(table.primary_key_columns().next().unwrap().name, "id");
}

#[test]
fn foreign_keys_collapse_to_one_column_with_a_constraint() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Person")
            .metadata(metadata.clone())
            .database(database.clone())
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );
    builder.register(
        ModelDef::new("Truck")
            .metadata(metadata)
            .database(database)
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::foreign_key("owner", "Person").nullable()),
    );

    let schema = builder.build().unwrap();
    let trucks = schema.table_by_name("trucks").unwrap();

    assert_eq!(column_names(&schema, "trucks"), ["id", "owner"]);

    let owner = trucks.column_by_name("owner").unwrap();
    // The foreign-key column takes the target primary key's type.
    assert_eq!(owner.ty, ScalarType::Integer);
    assert!(owner.nullable);
    assert!(!owner.auto_increment);

    let persons = schema.table_by_name("persons").unwrap();
    assert_eq!(trucks.foreign_keys.len(), 1);
    let fk = &trucks.foreign_keys[0];
    assert_eq!(fk.target_table, persons.id);
    assert_eq!(trucks.column(fk.column).name, "owner");
    assert_eq!(persons.column(fk.target_column).name, "id");
}

#[test]
fn many_to_many_builds_a_through_table_and_no_columns() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Person")
            .metadata(metadata.clone())
            .database(database.clone())
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );
    builder.register(
        ModelDef::new("Team")
            .metadata(metadata)
            .database(database)
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::many_to_many("members", "Person")),
    );

    let schema = builder.build().unwrap();

    // Neither side grows a column.
    assert_eq!(column_names(&schema, "teams"), ["id"]);
    assert_eq!(column_names(&schema, "persons"), ["id"]);

    let through = schema.table_by_name("teams_persons").unwrap();
    assert_eq!(column_names(&schema, "teams_persons"), ["id", "team", "person"]);
    assert_eq!(through.foreign_keys.len(), 2);
    assert!(through.column_by_name("id").unwrap().auto_increment);

    // Composite unique constraint over the two sides.
    assert_eq!(through.indices.len(), 1);
    let index = &through.indices[0];
    assert!(index.unique);
    let index_columns: Vec<&str> = index
        .columns
        .iter()
        .map(|column| through.column(*column).name.as_str())
        .collect();
    assert_eq!(index_columns, ["team", "person"]);

    let edge = &schema.relations()[0];
    assert_eq!(edge.through, Some(through.id));
}

#[test]
fn through_table_name_can_be_overridden() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Person")
            .metadata(metadata.clone())
            .database(database.clone())
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );
    builder.register(
        ModelDef::new("Team")
            .metadata(metadata)
            .database(database)
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::many_to_many("members", "Person").through("memberships")),
    );

    let schema = builder.build().unwrap();
    assert!(schema.table_by_name("memberships").is_some());
    assert!(schema.table_by_name("teams_persons").is_none());
}

#[test]
fn duplicate_physical_column_names_are_rejected() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Event")
            .metadata(metadata)
            .database(database)
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::scalar("starts_at", ScalarType::DateTime).column("at"))
            .field(FieldDef::scalar("ends_at", ScalarType::DateTime).column("at")),
    );

    let err = builder.build().unwrap_err();
    assert!(err.message().contains("`at`"), "{err}");
    assert!(err.message().contains("Event"), "{err}");
}

#[test]
fn unique_fields_and_constraints_become_unique_indices() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Account")
            .metadata(metadata)
            .database(database)
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::scalar("email", ScalarType::String).unique())
            .field(FieldDef::scalar("first_name", ScalarType::String))
            .field(FieldDef::scalar("last_name", ScalarType::String))
            .constraint(Constraint::unique(["first_name", "last_name"])),
    );

    let schema = builder.build().unwrap();
    let accounts = schema.table_by_name("accounts").unwrap();

    assert_eq!(accounts.indices.len(), 2);
    assert_eq!(accounts.indices[0].name, "uq_accounts_email");
    assert!(accounts.indices[0].unique);
    assert_eq!(accounts.indices[1].name, "uq_accounts_first_name_last_name");
    assert_eq!(accounts.indices[1].columns.len(), 2);
}

#[test]
fn integer_primary_keys_auto_increment_by_default() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Counter")
            .metadata(metadata.clone())
            .database(database.clone())
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );
    builder.register(
        ModelDef::new("Token")
            .metadata(metadata.clone())
            .database(database.clone())
            .field(FieldDef::scalar("id", ScalarType::Uuid).primary_key()),
    );
    builder.register(
        ModelDef::new("Ledger")
            .metadata(metadata)
            .database(database)
            .field(
                FieldDef::scalar("id", ScalarType::Integer)
                    .primary_key()
                    .auto_increment(false),
            ),
    );

    let schema = builder.build().unwrap();

    assert!(schema
        .table_by_name("counters")
        .unwrap()
        .column_by_name("id")
        .unwrap()
        .auto_increment);
    assert!(!schema
        .table_by_name("tokens")
        .unwrap()
        .column_by_name("id")
        .unwrap()
        .auto_increment);
    assert!(!schema
        .table_by_name("ledgers")
        .unwrap()
        .column_by_name("id")
        .unwrap()
        .auto_increment);
}

#[test]
fn table_name_prefix_applies_to_all_tables() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.table_name_prefix("app_");
    builder.register(
        ModelDef::new("Person")
            .metadata(metadata.clone())
            .database(database.clone())
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );
    builder.register(
        ModelDef::new("Team")
            .metadata(metadata)
            .database(database)
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::many_to_many("members", "Person")),
    );

    let schema = builder.build().unwrap();

    assert!(schema.table_by_name("app_persons").is_some());
    assert!(schema.table_by_name("app_teams").is_some());
    assert!(schema.table_by_name("app_teams_persons").is_some());
    // The logical table name on the model stays unprefixed.
    assert_eq!(
        schema.model_by_name("Person").unwrap().table_name(),
        Some("persons")
    );
}

#[test]
fn lowering_is_deterministic_across_builds() {
    fn build() -> griddle::Schema {
        let (metadata, database) = storage();
        let mut builder = Builder::new();
        builder.register(
            ModelDef::new("Base")
                .abstract_model()
                .metadata(metadata.clone())
                .database(database.clone())
                .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
                .field(FieldDef::scalar("created", ScalarType::DateTime)),
        );
        builder.register(
            ModelDef::new("Doc")
                .base("Base")
                .field(FieldDef::scalar("title", ScalarType::String))
                .field(FieldDef::scalar("created", ScalarType::Date)),
        );
        builder.build().unwrap()
    }

    let first = build();
    let second = build();

    assert_eq!(column_names(&first, "docs"), column_names(&second, "docs"));
    assert_eq!(column_names(&first, "docs"), ["id", "created", "title"]);
}

#[test]
fn duplicate_table_names_are_rejected() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Person")
            .metadata(metadata.clone())
            .database(database.clone())
            .table_name("people")
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );
    builder.register(
        ModelDef::new("Human")
            .metadata(metadata)
            .database(database)
            .table_name("people")
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );

    let err = builder.build().unwrap_err();
    assert!(err.message().contains("people"), "{err}");
}
