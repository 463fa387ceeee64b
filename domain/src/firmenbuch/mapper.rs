//! Record mapper: unwrapped registry responses → normalized records.
//!
//! Every read goes through [`FieldReader`], which tracks the dotted path of
//! the field being read so a missing required field is reported precisely
//! (`AUSZUG_V2_RESPONSE.FIRMA.FI_DKZ02.BEZEICHNUNG`). `0..N` fields are only
//! reachable through [`FieldReader::plural_nodes`] and
//! [`FieldReader::plural_texts`], both of which normalize first. Every other
//! field is single-valued and a repeated occurrence is rejected.

use tracing::{debug, warn};

use super::dates::decode_packed_date;
use super::entities::{
    Address, BusinessRecord, FunctionRecord, PersonRecord, SearchResultRecord,
};
use crate::core::error::{AdapterError, AdapterResult};
use crate::document::{ATTRIBUTE_PREFIX, AttributedNode, NodeValue, Scalar, TEXT_KEY};

/// Root element of the company extract response
pub const EXTRACT_RESPONSE: &str = "AUSZUG_V2_RESPONSE";

/// Root element of the company search response
pub const SEARCH_RESPONSE: &str = "SUCHEFIRMARESPONSE";

/// Path-aware view of one node
#[derive(Debug, Clone)]
struct FieldReader<'a> {
    node: &'a AttributedNode,
    path: String,
}

impl<'a> FieldReader<'a> {
    fn root(body: &'a AttributedNode, name: &str) -> AdapterResult<Self> {
        let node = body.node(name).ok_or_else(|| AdapterError::missing(name))?;
        Ok(Self {
            node,
            path: name.to_string(),
        })
    }

    fn path_of(&self, field: &str) -> String {
        format!("{}.{}", self.path, field)
    }

    fn has(&self, field: &str) -> bool {
        self.node.contains(field)
    }

    /// The value of a single-valued field
    fn single(&self, field: &str) -> AdapterResult<Option<&'a NodeValue>> {
        match self.node.get(field) {
            Some(NodeValue::List(_)) => Err(AdapterError::repeated(self.path_of(field))),
            value => Ok(value),
        }
    }

    fn child(&self, field: &str) -> AdapterResult<FieldReader<'a>> {
        self.optional_child(field)?
            .ok_or_else(|| AdapterError::missing(self.path_of(field)))
    }

    fn optional_child(&self, field: &str) -> AdapterResult<Option<FieldReader<'a>>> {
        Ok(self
            .single(field)?
            .and_then(NodeValue::as_node)
            .map(|node| FieldReader {
                node,
                path: self.path_of(field),
            }))
    }

    /// A required leaf, keeping its source type
    fn scalar(&self, field: &str) -> AdapterResult<Scalar> {
        self.optional_scalar(field)?
            .ok_or_else(|| AdapterError::missing(self.path_of(field)))
    }

    fn optional_scalar(&self, field: &str) -> AdapterResult<Option<Scalar>> {
        Ok(self.single(field)?.and_then(leaf))
    }

    /// A required leaf rendered as text
    fn text(&self, field: &str) -> AdapterResult<String> {
        self.scalar(field).map(|scalar| scalar.to_string())
    }

    fn optional_text(&self, field: &str) -> AdapterResult<Option<String>> {
        Ok(self.optional_scalar(field)?.map(|scalar| scalar.to_string()))
    }

    fn attribute(&self, name: &str) -> AdapterResult<Scalar> {
        self.node.attribute(name).cloned().ok_or_else(|| {
            AdapterError::missing(self.path_of(&format!("{}{}", ATTRIBUTE_PREFIX, name)))
        })
    }

    /// A `0..N` field of elements, normalized to a sequence
    fn plural_nodes(&self, field: &str) -> AdapterResult<Vec<FieldReader<'a>>> {
        self.node
            .plural(field)
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let path = format!("{}[{}]", self.path_of(field), index);
                match value.as_node() {
                    Some(node) => Ok(FieldReader { node, path }),
                    None => Err(AdapterError::missing(path)),
                }
            })
            .collect()
    }

    /// A `0..N` field of text fragments, normalized to a sequence
    fn plural_texts(&self, field: &str) -> Vec<String> {
        self.node
            .plural(field)
            .into_iter()
            .filter_map(leaf)
            .map(|scalar| scalar.to_string())
            .collect()
    }
}

/// Leaf value of a field: a plain scalar, or the text of an element that
/// also carries attributes. Lists are not leaves.
fn leaf(value: &NodeValue) -> Option<Scalar> {
    match value {
        NodeValue::Scalar(scalar) => Some(scalar.clone()),
        NodeValue::Node(node) => node.scalar(TEXT_KEY).cloned(),
        NodeValue::List(_) => None,
    }
}

/// Map an unwrapped `AUSZUG_V2_RESPONSE` body into a [`BusinessRecord`].
///
/// Fails with [`AdapterError::MalformedUpstreamResponse`] when a required
/// field is absent, a single-valued field repeats or a value is unreadable;
/// no partial record is produced.
pub fn map_business_record(body: &AttributedNode) -> AdapterResult<BusinessRecord> {
    let response = FieldReader::root(body, EXTRACT_RESPONSE)?;
    let firma = response.child("FIRMA")?;

    let name = firma.child("FI_DKZ02")?.text("BEZEICHNUNG")?;
    let legal_form = firma.child("FI_DKZ07")?.child("RECHTSFORM")?.text("TEXT")?;
    let description = firma
        .optional_child("FI_DKZ05")?
        .map(|dkz05| dkz05.optional_text("TEXT"))
        .transpose()?
        .flatten();
    let place_of_business = firma
        .optional_child("FI_DKZ06")?
        .map(|dkz06| dkz06.optional_text("SITZ"))
        .transpose()?
        .flatten();
    let address = map_address(&firma)?;

    let functions = response
        .plural_nodes("FUN")?
        .iter()
        .map(map_function)
        .collect::<AdapterResult<Vec<_>>>()?;

    let persons = response
        .plural_nodes("PER")?
        .iter()
        .map(|person| map_person(person, &functions))
        .collect::<AdapterResult<Vec<_>>>()?;

    debug!(
        persons = persons.len(),
        functions = functions.len(),
        has_address = address.is_some(),
        "Mapped company extract"
    );

    Ok(BusinessRecord {
        name,
        legal_form,
        description,
        place_of_business,
        address,
        persons,
    })
}

/// Resolve the address variant by field presence
fn map_address(firma: &FieldReader<'_>) -> AdapterResult<Option<Address>> {
    let Some(dkz03) = firma.optional_child("FI_DKZ03")? else {
        return Ok(None);
    };

    let has_street = dkz03.has("STRASSE");
    let has_place = dkz03.has("STELLE");
    if !has_street && !has_place {
        warn!(path = %dkz03.path, "Address carries neither street nor place; omitting it");
        return Ok(None);
    }

    let city = dkz03.text("ORT")?;
    let zip_code = dkz03.scalar("PLZ")?;

    let address = if has_street {
        if has_place {
            warn!(path = %dkz03.path, "Address carries both street and place; using street");
        }
        Address::Street {
            street_name: dkz03.text("STRASSE")?,
            street_number: dkz03.scalar("HAUSNUMMER")?,
            city,
            zip_code,
        }
    } else {
        Address::Place {
            street_name: dkz03.text("STELLE")?,
            city,
            zip_code,
        }
    };

    Ok(Some(address))
}

/// A function entry with its foreign key into the person collection
struct KeyedFunction {
    person_key: Scalar,
    record: FunctionRecord,
}

fn map_function(function: &FieldReader<'_>) -> AdapterResult<KeyedFunction> {
    let person_key = function.attribute("PNR")?;
    let name = function.attribute("FKENTEXT")?.to_string();
    let note = function.child("FU_DKZ10")?.plural_texts("TEXT").join(" ");

    Ok(KeyedFunction {
        person_key,
        record: FunctionRecord { name, note },
    })
}

fn map_person(person: &FieldReader<'_>, functions: &[KeyedFunction]) -> AdapterResult<PersonRecord> {
    let key = person.attribute("PNR")?;
    let details = person.child("PE_DKZ02")?;
    let name = details.text("NAME_FORMATIERT")?;

    let packed = details
        .scalar("GEBURTSDATUM")?
        .as_i64()
        .ok_or_else(|| AdapterError::invalid_value(details.path_of("GEBURTSDATUM")))?;
    let birthday = decode_packed_date(packed);

    let functions = functions
        .iter()
        .filter(|function| function.person_key == key)
        .map(|function| function.record.clone())
        .collect();

    Ok(PersonRecord {
        name,
        birthday,
        functions,
    })
}

/// Map an unwrapped `SUCHEFIRMARESPONSE` body into search hits
pub fn map_search_results(body: &AttributedNode) -> AdapterResult<Vec<SearchResultRecord>> {
    let response = FieldReader::root(body, SEARCH_RESPONSE)?;

    let results = response
        .plural_nodes("ERGEBNIS")?
        .iter()
        .map(map_search_hit)
        .collect::<AdapterResult<Vec<_>>>()?;

    debug!(hits = results.len(), "Mapped company search");
    Ok(results)
}

fn map_search_hit(hit: &FieldReader<'_>) -> AdapterResult<SearchResultRecord> {
    // The empty string means "no state"; 0 or false are real values.
    let state = hit
        .optional_scalar("STATUS")?
        .filter(|status| !status.is_empty_text())
        .map(|status| status.to_string());

    Ok(SearchResultRecord {
        court: hit.child("GERICHT")?.text("TEXT")?,
        corporate_register_number: hit.text("FNR")?,
        legal_form: hit.child("RECHTSFORM")?.text("TEXT")?,
        name: hit.plural_texts("NAME").join(" "),
        place_of_business: hit.text("SITZ")?,
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn code_text(code: impl Into<Scalar>, text: &str) -> AttributedNode {
        AttributedNode::new()
            .with("CODE", NodeValue::Scalar(code.into()))
            .with("TEXT", text)
    }

    fn firma() -> AttributedNode {
        AttributedNode::new()
            .with(
                "FI_DKZ02",
                AttributedNode::new()
                    .with_attribute("AUFRECHT", "true")
                    .with("BEZEICHNUNG", "Muster Handels GmbH"),
            )
            .with(
                "FI_DKZ07",
                AttributedNode::new().with(
                    "RECHTSFORM",
                    code_text("GES", "Gesellschaft mit beschränkter Haftung"),
                ),
            )
    }

    fn person(key: &str, name: &str, birthday: i64) -> AttributedNode {
        AttributedNode::new().with_attribute("PNR", key).with(
            "PE_DKZ02",
            AttributedNode::new()
                .with("VORNAME", "Max")
                .with("NAME_FORMATIERT", name)
                .with("GEBURTSDATUM", birthday),
        )
    }

    fn function(key: &str, name: &str, texts: &[&str]) -> AttributedNode {
        let mut dkz10 = AttributedNode::new().with("DATVON", 20200101);
        for text in texts {
            dkz10.push("TEXT", *text);
        }
        AttributedNode::new()
            .with_attribute("FKEN", "GF")
            .with_attribute("FKENTEXT", name)
            .with_attribute("PNR", key)
            .with("FU_DKZ10", dkz10)
    }

    fn extract_body(response: AttributedNode) -> AttributedNode {
        AttributedNode::new().with(EXTRACT_RESPONSE, response)
    }

    fn address_of(dkz03: AttributedNode) -> Option<Address> {
        let body = extract_body(
            AttributedNode::new().with("FIRMA", firma().with("FI_DKZ03", dkz03)),
        );
        map_business_record(&body).unwrap().address
    }

    #[test]
    fn test_minimal_record() {
        let body = extract_body(AttributedNode::new().with("FIRMA", firma()));

        let record = map_business_record(&body).unwrap();

        assert_eq!(record.name, "Muster Handels GmbH");
        assert_eq!(record.legal_form, "Gesellschaft mit beschränkter Haftung");
        assert!(record.description.is_none());
        assert!(record.place_of_business.is_none());
        assert!(record.address.is_none());
        assert!(record.persons.is_empty());
    }

    #[test]
    fn test_optional_fields_pass_through() {
        let body = extract_body(
            AttributedNode::new().with(
                "FIRMA",
                firma()
                    .with("FI_DKZ05", AttributedNode::new().with("TEXT", "Handel mit Waren aller Art"))
                    .with(
                        "FI_DKZ06",
                        AttributedNode::new()
                            .with("ORTNR", code_text(90001, "Wien"))
                            .with("SITZ", "Wien"),
                    ),
            ),
        );

        let record = map_business_record(&body).unwrap();
        assert_eq!(record.description.as_deref(), Some("Handel mit Waren aller Art"));
        assert_eq!(record.place_of_business.as_deref(), Some("Wien"));
    }

    #[test]
    fn test_street_address_variant() {
        let address = address_of(
            AttributedNode::new()
                .with("STAAT", "AUT")
                .with("STRASSE", "Hauptstraße")
                .with("HAUSNUMMER", 12)
                .with("ORT", "Wien")
                .with("PLZ", 1010)
                .with("ZUSTELLBAR", true),
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&address).unwrap(),
            json!({"streetName": "Hauptstraße", "streetNumber": 12, "city": "Wien", "zipCode": 1010})
        );
    }

    #[test]
    fn test_place_address_variant() {
        let address = address_of(
            AttributedNode::new()
                .with("STELLE", "Hauptpostamt")
                .with("ORT", "Linz")
                .with("PLZ", 4020),
        )
        .unwrap();

        assert_eq!(
            address,
            Address::Place {
                street_name: "Hauptpostamt".into(),
                city: "Linz".into(),
                zip_code: Scalar::Integer(4020),
            }
        );
        let value = serde_json::to_value(&address).unwrap();
        assert!(value.get("streetNumber").is_none());
    }

    #[test]
    fn test_textual_house_number_is_kept() {
        let address = address_of(
            AttributedNode::new()
                .with("STRASSE", "Landstraße")
                .with("HAUSNUMMER", "12a/3")
                .with("ORT", "Linz")
                .with("PLZ", 4020),
        )
        .unwrap();

        let value = serde_json::to_value(&address).unwrap();
        assert_eq!(value["streetNumber"], "12a/3");
    }

    #[test]
    fn test_address_without_variant_is_absent() {
        let address = address_of(AttributedNode::new().with("ORT", "Graz").with("PLZ", 8010));
        assert!(address.is_none());
    }

    #[test]
    fn test_address_without_city_fails() {
        let body = extract_body(AttributedNode::new().with(
            "FIRMA",
            firma().with(
                "FI_DKZ03",
                AttributedNode::new().with("STELLE", "Hauptpostamt").with("PLZ", 4020),
            ),
        ));

        let err = map_business_record(&body).unwrap_err();
        assert_eq!(err, AdapterError::missing("AUSZUG_V2_RESPONSE.FIRMA.FI_DKZ03.ORT"));
    }

    #[test]
    fn test_functions_cross_referenced_by_person_key() {
        let body = extract_body(
            AttributedNode::new()
                .with("FIRMA", firma())
                .with("FUN", function("P1", "Geschäftsführer", &["vertritt seit 2020"]))
                .with("FUN", function("P2", "Prokurist", &["Gesamtprokura"]))
                .with("FUN", function("P1", "Gesellschafter", &["Stammeinlage", "EUR 35.000"]))
                .with("PER", person("P1", "Max Muster", 19800512))
                .with("PER", person("P2", "Erika Beispiel", 19751103)),
        );

        let record = map_business_record(&body).unwrap();
        assert_eq!(record.persons.len(), 2);

        let max = &record.persons[0];
        assert_eq!(max.name, "Max Muster");
        assert_eq!(max.birthday, "1980-05-12");
        assert_eq!(
            max.functions,
            vec![
                FunctionRecord {
                    name: "Geschäftsführer".into(),
                    note: "vertritt seit 2020".into(),
                },
                FunctionRecord {
                    name: "Gesellschafter".into(),
                    note: "Stammeinlage EUR 35.000".into(),
                },
            ]
        );

        let erika = &record.persons[1];
        assert_eq!(erika.functions.len(), 1);
        assert_eq!(erika.functions[0].name, "Prokurist");
    }

    #[test]
    fn test_single_person_and_function_are_normalized() {
        let body = extract_body(
            AttributedNode::new()
                .with("FIRMA", firma())
                .with("FUN", function("P1", "Geschäftsführer", &["selbständig"]))
                .with("PER", person("P1", "Max Muster", 19800512)),
        );

        let record = map_business_record(&body).unwrap();
        assert_eq!(record.persons.len(), 1);
        assert_eq!(record.persons[0].functions.len(), 1);
        assert_eq!(record.persons[0].functions[0].note, "selbständig");
    }

    #[test]
    fn test_function_without_text_has_empty_note() {
        let body = extract_body(
            AttributedNode::new()
                .with("FIRMA", firma())
                .with("FUN", function("P1", "Kommanditist", &[]))
                .with("PER", person("P1", "Max Muster", 19800512)),
        );

        let record = map_business_record(&body).unwrap();
        assert_eq!(record.persons[0].functions[0].note, "");
    }

    #[test]
    fn test_person_without_functions() {
        let body = extract_body(
            AttributedNode::new()
                .with("FIRMA", firma())
                .with("PER", person("P9", "Erika Beispiel", 19751103)),
        );

        let record = map_business_record(&body).unwrap();
        let person = &record.persons[0];
        assert!(person.functions.is_empty());

        let value = serde_json::to_value(person).unwrap();
        assert_eq!(value["birthday"], "1975-11-03");
        assert_eq!(value["functions"], json!([]));
    }

    #[test]
    fn test_person_without_birthday_fails() {
        let undated = AttributedNode::new().with_attribute("PNR", "P1").with(
            "PE_DKZ02",
            AttributedNode::new().with("NAME_FORMATIERT", "Max Muster"),
        );
        let body = extract_body(
            AttributedNode::new()
                .with("FIRMA", firma())
                .with("PER", undated),
        );

        let err = map_business_record(&body).unwrap_err();
        assert_eq!(
            err,
            AdapterError::missing("AUSZUG_V2_RESPONSE.PER[0].PE_DKZ02.GEBURTSDATUM")
        );
    }

    #[test]
    fn test_unreadable_birthday_is_an_invalid_value() {
        let garbled = AttributedNode::new().with_attribute("PNR", "P1").with(
            "PE_DKZ02",
            AttributedNode::new()
                .with("NAME_FORMATIERT", "Max Muster")
                .with("GEBURTSDATUM", "unbekannt"),
        );
        let body = extract_body(
            AttributedNode::new()
                .with("FIRMA", firma())
                .with("PER", person("P2", "Erika Beispiel", 19751103))
                .with("PER", garbled),
        );

        let err = map_business_record(&body).unwrap_err();
        assert_eq!(
            err,
            AdapterError::invalid_value("AUSZUG_V2_RESPONSE.PER[1].PE_DKZ02.GEBURTSDATUM")
        );
        assert!(err.to_string().contains("invalid value"));
    }

    #[test]
    fn test_repeated_description_is_rejected() {
        let body = extract_body(
            AttributedNode::new().with(
                "FIRMA",
                firma()
                    .with("FI_DKZ05", AttributedNode::new().with("TEXT", "Handel"))
                    .with("FI_DKZ05", AttributedNode::new().with("TEXT", "Gewerbe")),
            ),
        );

        let err = map_business_record(&body).unwrap_err();
        assert_eq!(err, AdapterError::repeated("AUSZUG_V2_RESPONSE.FIRMA.FI_DKZ05"));
    }

    #[test]
    fn test_repeated_required_leaf_is_rejected() {
        let body = extract_body(AttributedNode::new().with(
            "FIRMA",
            AttributedNode::new()
                .with(
                    "FI_DKZ02",
                    AttributedNode::new()
                        .with("BEZEICHNUNG", "Muster GmbH")
                        .with("BEZEICHNUNG", "Muster Handels GmbH"),
                )
                .with(
                    "FI_DKZ07",
                    AttributedNode::new().with("RECHTSFORM", code_text("GES", "GmbH")),
                ),
        ));

        let err = map_business_record(&body).unwrap_err();
        assert_eq!(
            err,
            AdapterError::repeated("AUSZUG_V2_RESPONSE.FIRMA.FI_DKZ02.BEZEICHNUNG")
        );
    }

    #[test]
    fn test_missing_name_fails_with_path() {
        let body = extract_body(AttributedNode::new().with(
            "FIRMA",
            AttributedNode::new()
                .with("FI_DKZ02", AttributedNode::new().with_attribute("AUFRECHT", "true"))
                .with(
                    "FI_DKZ07",
                    AttributedNode::new().with("RECHTSFORM", code_text("GES", "GmbH")),
                ),
        ));

        let err = map_business_record(&body).unwrap_err();
        assert_eq!(
            err,
            AdapterError::missing("AUSZUG_V2_RESPONSE.FIRMA.FI_DKZ02.BEZEICHNUNG")
        );
    }

    #[test]
    fn test_missing_legal_form_fails() {
        let body = extract_body(AttributedNode::new().with(
            "FIRMA",
            AttributedNode::new()
                .with("FI_DKZ02", AttributedNode::new().with("BEZEICHNUNG", "Muster GmbH")),
        ));

        let err = map_business_record(&body).unwrap_err();
        assert_eq!(err, AdapterError::missing("AUSZUG_V2_RESPONSE.FIRMA.FI_DKZ07"));
    }

    #[test]
    fn test_missing_response_node_fails() {
        let err = map_business_record(&AttributedNode::new()).unwrap_err();
        assert_eq!(err, AdapterError::missing("AUSZUG_V2_RESPONSE"));
    }

    #[test]
    fn test_person_missing_key_fails_with_indexed_path() {
        let keyless = AttributedNode::new().with(
            "PE_DKZ02",
            AttributedNode::new().with("NAME_FORMATIERT", "Max Muster"),
        );
        let body = extract_body(
            AttributedNode::new()
                .with("FIRMA", firma())
                .with("PER", person("P1", "Erika Beispiel", 19751103))
                .with("PER", keyless),
        );

        let err = map_business_record(&body).unwrap_err();
        assert_eq!(err, AdapterError::missing("AUSZUG_V2_RESPONSE.PER[1].@_PNR"));
    }

    fn hit(fnr: &str, names: &[&str], status: impl Into<Scalar>) -> AttributedNode {
        let mut node = AttributedNode::new()
            .with("FNR", fnr)
            .with("STATUS", NodeValue::Scalar(status.into()));
        for name in names {
            node.push("NAME", *name);
        }
        node.with("SITZ", "Wien")
            .with("RECHTSFORM", code_text("GES", "Gesellschaft mit beschränkter Haftung"))
            .with("RECHTSEIGENSCHAFT", "")
            .with("GERICHT", code_text("HG", "Handelsgericht Wien"))
    }

    fn search_body(response: AttributedNode) -> AttributedNode {
        AttributedNode::new().with(SEARCH_RESPONSE, response)
    }

    #[test]
    fn test_search_results_mapping() {
        let body = search_body(
            AttributedNode::new()
                .with_attribute("REQUEST_FIRMENWORTLAUT", "Muster")
                .with("ERGEBNIS", hit("123456a", &["Muster", "Handels GmbH"], ""))
                .with("ERGEBNIS", hit("654321b", &["Muster KG"], "geloescht")),
        );

        let results = map_search_results(&body).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].name, "Muster Handels GmbH");
        assert_eq!(results[0].corporate_register_number, "123456a");
        assert_eq!(results[0].court, "Handelsgericht Wien");
        assert_eq!(results[0].legal_form, "Gesellschaft mit beschränkter Haftung");
        assert_eq!(results[0].place_of_business, "Wien");
        assert!(results[0].state.is_none());

        assert_eq!(results[1].state.as_deref(), Some("geloescht"));
    }

    #[test]
    fn test_empty_status_is_suppressed_but_zero_is_kept() {
        let body = search_body(
            AttributedNode::new()
                .with("ERGEBNIS", hit("1a", &["A"], ""))
                .with("ERGEBNIS", hit("2b", &["B"], 0)),
        );

        let results = map_search_results(&body).unwrap();
        let json = serde_json::to_value(&results).unwrap();
        assert!(json[0].get("state").is_none());
        assert_eq!(json[1]["state"], "0");
    }

    #[test]
    fn test_search_without_results() {
        let body = search_body(
            AttributedNode::new().with_attribute("REQUEST_FIRMENWORTLAUT", "Nichts"),
        );
        assert!(map_search_results(&body).unwrap().is_empty());
    }

    #[test]
    fn test_single_search_result_is_normalized() {
        let body = search_body(AttributedNode::new().with("ERGEBNIS", hit("1a", &["Solo GmbH"], "")));

        let results = map_search_results(&body).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Solo GmbH");
    }

    #[test]
    fn test_search_hit_missing_court_fails() {
        let broken = AttributedNode::new()
            .with("FNR", "1a")
            .with("NAME", "A")
            .with("SITZ", "Wien")
            .with("RECHTSFORM", code_text("GES", "GmbH"));
        let body = search_body(AttributedNode::new().with("ERGEBNIS", broken));

        let err = map_search_results(&body).unwrap_err();
        assert_eq!(err, AdapterError::missing("SUCHEFIRMARESPONSE.ERGEBNIS[0].GERICHT"));
    }
}
