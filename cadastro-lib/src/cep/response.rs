//! Address service response body

use serde::Deserialize;
use serde_json::Value;

use super::Address;

/// Body returned by the address service.
///
/// Unknown codes come back as `{"erro": true}`; older deployments send the
/// flag as the string `"true"`.
#[derive(Debug, Deserialize)]
pub(crate) struct ViaCepResponse {
    #[serde(default)]
    erro: Option<Value>,
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepResponse {
    /// Returns `true` if the service flagged the code as unknown.
    pub(crate) fn is_error(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Converts the body into an address, or `None` for unknown codes.
    pub(crate) fn into_address(self) -> Option<Address> {
        if self.is_error() {
            return None;
        }
        Some(Address {
            cep: self.cep,
            street: self.logradouro,
            complement: self.complemento,
            neighborhood: self.bairro,
            city: self.localidade,
            state: self.uf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_body() {
        let body = r#"{
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308"
        }"#;
        let response: ViaCepResponse = serde_json::from_str(body).unwrap();
        let address = response.into_address().unwrap();
        assert_eq!(address.street, "Praça da Sé");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");
        assert_eq!(address.neighborhood, "Sé");
    }

    #[test]
    fn test_error_flag_variants() {
        for body in [r#"{"erro": true}"#, r#"{"erro": "true"}"#] {
            let response: ViaCepResponse = serde_json::from_str(body).unwrap();
            assert!(response.into_address().is_none(), "{body}");
        }

        let response: ViaCepResponse = serde_json::from_str(r#"{"erro": false}"#).unwrap();
        assert!(!response.is_error());
    }
}
