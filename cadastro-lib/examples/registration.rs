//! Registration form example.
//!
//! Run with: cargo run --example registration
//!
//! Fills the standard registration form, looks the postal code up on the
//! real service and prints each field's outcome. Set CADASTRO_CEP_URL in a
//! .env file to use another endpoint.

use std::env;

use cadastro_lib::{FieldKind, Form, Validator, ValidatorConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let mut config = ValidatorConfig::default();
    if let Ok(url) = env::var("CADASTRO_CEP_URL") {
        config = config.with_cep_base_url(url);
    }
    let validator = Validator::standard(&config)?;

    let form = Form::registration();
    let values = [
        (FieldKind::Name, "Maria Silva"),
        (FieldKind::Email, "maria@exemplo"),
        (FieldKind::Password, "segredo"),
        (FieldKind::BirthDate, "1990-04-12"),
        (FieldKind::Cpf, "529.982.247-25"),
        (FieldKind::Cep, "01001-000"),
    ];
    for (kind, value) in values {
        if let Some(field) = form.field(kind) {
            field.set_value(value);
        }
    }

    println!("Validating...\n");

    let result = validator.validate_form(&form).await;

    for field in form.fields() {
        match field.error() {
            None => println!("  {:<16} ok ({})", field.kind(), field.value()),
            Some(message) => println!("  {:<16} {}", field.kind(), message),
        }
    }

    println!("\n{} invalid field(s)", result.errors().len());

    Ok(())
}
