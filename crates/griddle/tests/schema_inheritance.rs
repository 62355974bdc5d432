use griddle::schema::app::{Constraint, DatabaseHandle, FieldTy, ScalarType, SchemaHandle};
use griddle::schema::def::{FieldDef, MixinDef, ModelDef};
use griddle::schema::Builder;
use griddle::Value;

use pretty_assertions::assert_eq;

fn storage() -> (SchemaHandle, DatabaseHandle) {
    (SchemaHandle::new("registry"), DatabaseHandle::new("pool"))
}

/// Abstract base with renamed date columns and a composite unique
/// constraint over the physical names.
fn date_fields_model(metadata: &SchemaHandle, database: &DatabaseHandle) -> ModelDef {
    ModelDef::new("DateFieldsModel")
        .abstract_model()
        .metadata(metadata.clone())
        .database(database.clone())
        .field(
            FieldDef::scalar("created_date", ScalarType::DateTime)
                .column("creation_date")
                .default_factory(|| Value::String("now".to_string())),
        )
        .field(
            FieldDef::scalar("updated_date", ScalarType::DateTime)
                .column("modification_date")
                .default_factory(|| Value::String("now".to_string())),
        )
        .constraint(Constraint::unique(["creation_date", "modification_date"]))
}

#[test]
fn child_redefinition_replaces_the_field_wholesale() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(date_fields_model(&metadata, &database));
    builder.register(
        ModelDef::new("RedefinedField")
            .base("DateFieldsModel")
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::scalar("created_date", ScalarType::String).column("creation_date")),
    );

    let schema = builder.build().unwrap();
    let model = schema.model_by_name("RedefinedField").unwrap();

    let created = model.field_by_name("created_date").unwrap();
    assert_eq!(created.ty.as_scalar(), Some(ScalarType::String));
    assert_eq!(created.column_name(), "creation_date");
    // The override did not declare a default, so the parent's factory is
    // discarded along with everything else.
    assert!(created.default.is_none());

    // The inherited field is untouched.
    let updated = model.field_by_name("updated_date").unwrap();
    assert_eq!(updated.ty.as_scalar(), Some(ScalarType::DateTime));
    assert!(updated.default.is_some());
}

#[test]
fn redefined_field_keeps_its_original_position() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(date_fields_model(&metadata, &database));
    builder.register(
        ModelDef::new("RedefinedField")
            .base("DateFieldsModel")
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::scalar("created_date", ScalarType::String).column("creation_date")),
    );

    let schema = builder.build().unwrap();
    let model = schema.model_by_name("RedefinedField").unwrap();

    let names: Vec<&str> = model
        .fields
        .iter()
        .map(|field| field.name.app_name.as_str())
        .collect();
    assert_eq!(names, ["created_date", "updated_date", "id"]);
}

#[test]
fn dropping_the_column_override_invalidates_the_constraint() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(date_fields_model(&metadata, &database));
    builder.register(
        ModelDef::new("RedefinedField")
            .base("DateFieldsModel")
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            // No column override: the physical column is now `created_date`
            // and the inherited constraint still names `creation_date`.
            .field(FieldDef::scalar("created_date", ScalarType::String)),
    );

    let err = builder.build().unwrap_err();
    assert!(err.message().contains("creation_date"), "{err}");
    assert!(err.message().contains("RedefinedField"), "{err}");
}

#[test]
fn concrete_descendant_inherits_handles_by_identity() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Base")
            .abstract_model()
            .metadata(metadata.clone())
            .database(database.clone())
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );
    builder.register(ModelDef::new("Note").base("Base"));

    let schema = builder.build().unwrap();
    let note = schema.model_by_name("Note").unwrap();

    assert!(note.meta.metadata.as_ref().unwrap().same(&metadata));
    assert!(note.meta.database.as_ref().unwrap().same(&database));
}

#[test]
fn root_most_ancestor_wins_for_undeclared_meta_attributes() {
    let (root_metadata, root_database) = storage();
    let mid_database = DatabaseHandle::new("replica");

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Root")
            .abstract_model()
            .metadata(root_metadata.clone())
            .database(root_database.clone())
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );
    builder.register(
        ModelDef::new("Mid")
            .abstract_model()
            .base("Root")
            .database(mid_database.clone()),
    );
    builder.register(ModelDef::new("Leaf").base("Mid"));

    let schema = builder.build().unwrap();
    let leaf = schema.model_by_name("Leaf").unwrap();

    // The chain is walked root-first: the first declaring member supplies
    // the attribute, even when a nearer ancestor re-declared it.
    assert!(leaf.meta.metadata.as_ref().unwrap().same(&root_metadata));
    assert!(leaf.meta.database.as_ref().unwrap().same(&root_database));
}

#[test]
fn own_meta_declaration_beats_the_chain() {
    let (metadata, database) = storage();
    let own_database = DatabaseHandle::new("shard");

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Base")
            .abstract_model()
            .metadata(metadata.clone())
            .database(database.clone())
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );
    builder.register(
        ModelDef::new("Tenant")
            .base("Base")
            .database(own_database.clone()),
    );

    let schema = builder.build().unwrap();
    let tenant = schema.model_by_name("Tenant").unwrap();

    assert!(tenant.meta.database.as_ref().unwrap().same(&own_database));
    assert!(tenant.meta.metadata.as_ref().unwrap().same(&metadata));
}

#[test]
fn mixin_fields_are_collected_in_order() {
    let (metadata, database) = storage();

    let timestamps = MixinDef::new("Timestamps")
        .field(FieldDef::scalar("created", ScalarType::DateTime))
        .field(FieldDef::scalar("updated", ScalarType::DateTime).nullable());

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Article")
            .metadata(metadata)
            .database(database)
            .mixin(timestamps)
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );

    let schema = builder.build().unwrap();
    let article = schema.model_by_name("Article").unwrap();

    let names: Vec<&str> = article
        .fields
        .iter()
        .map(|field| field.name.app_name.as_str())
        .collect();
    assert_eq!(names, ["created", "updated", "id"]);
    assert!(article.field_by_name("updated").unwrap().nullable);
}

#[test]
fn empty_mixin_contributes_nothing() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Bare")
            .metadata(metadata)
            .database(database)
            .mixin(MixinDef::new("Nothing"))
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );

    let schema = builder.build().unwrap();
    let bare = schema.model_by_name("Bare").unwrap();
    assert_eq!(bare.fields.len(), 1);
}

#[test]
fn earlier_bases_override_later_ones() {
    let (metadata, database) = storage();

    let flags = MixinDef::new("Flags")
        .field(FieldDef::scalar("status", ScalarType::String).max_length(16));

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Base")
            .abstract_model()
            .metadata(metadata)
            .database(database)
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::scalar("status", ScalarType::Integer)),
    );
    // Declaration order `(Flags, Base)`: the mixin is more specific and its
    // `status` wins.
    builder.register(ModelDef::new("Job").mixin(flags).base("Base"));

    let schema = builder.build().unwrap();
    let job = schema.model_by_name("Job").unwrap();

    let status = job.field_by_name("status").unwrap();
    assert_eq!(status.ty.as_scalar(), Some(ScalarType::String));
    assert_eq!(status.max_length, Some(16));
}

#[test]
fn subclassing_a_concrete_model_is_rejected() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Person")
            .metadata(metadata)
            .database(database)
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key()),
    );
    builder.register(ModelDef::new("Employee").base("Person"));

    let err = builder.build().unwrap_err();
    assert!(err.message().contains("not abstract"), "{err}");
    // Construction failed before any table was built.
    assert!(err.message().contains("Employee"), "{err}");
}

#[test]
fn multi_level_chains_resolve_to_the_most_specific_declaration() {
    let (metadata, database) = storage();

    let mut builder = Builder::new();
    builder.register(
        ModelDef::new("Root")
            .abstract_model()
            .metadata(metadata)
            .database(database)
            .field(FieldDef::scalar("id", ScalarType::Integer).primary_key())
            .field(FieldDef::scalar("label", ScalarType::String).default_value("root")),
    );
    builder.register(
        ModelDef::new("Mid")
            .abstract_model()
            .base("Root")
            .field(FieldDef::scalar("label", ScalarType::Text)),
    );
    builder.register(ModelDef::new("Leaf").base("Mid"));

    let schema = builder.build().unwrap();
    let leaf = schema.model_by_name("Leaf").unwrap();

    let label = leaf.field_by_name("label").unwrap();
    // `Mid` redefined the field; the leaf sees that declaration, not a
    // merge of the two levels.
    assert_eq!(label.ty.as_scalar(), Some(ScalarType::Text));
    assert!(label.default.is_none());
    assert!(matches!(label.ty, FieldTy::Scalar(_)));
}
