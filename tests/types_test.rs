use serde_json::json;
use swagger_resolver::types::*;

#[test]
fn http_method_as_str_roundtrip() {
    for method in HttpMethod::ALL {
        let s = method.as_str();
        let parsed = HttpMethod::from_str(s)
            .unwrap_or_else(|| panic!("failed to parse HttpMethod from '{}'", s));
        assert_eq!(method, parsed, "roundtrip failed for HttpMethod::{}", s);
    }
    assert_eq!(HttpMethod::from_str("GET"), Some(HttpMethod::Get));
    assert!(HttpMethod::from_str("trace").is_none());
}

#[test]
fn model_variants_deserialize() {
    let reference: Model = serde_json::from_value(json!({"$ref": "http://h/s#/Pet"})).unwrap();
    assert_eq!(reference.as_reference(), Some("http://h/s#/Pet"));

    let array: Model =
        serde_json::from_value(json!({"type": "array", "items": {"type": "string"}})).unwrap();
    assert!(matches!(array, Model::Array(_)));

    let object: Model = serde_json::from_value(json!({
        "type": "object",
        "required": ["id"],
        "properties": {"id": {"type": "integer"}}
    }))
    .unwrap();
    let Model::Object(object) = object else {
        panic!("expected an object model");
    };
    assert!(object.properties.contains_key("id"));
    assert_eq!(object.extra["required"], json!(["id"]));

    assert!(serde_json::from_value::<Model>(json!("Pet")).is_err());
}

#[test]
fn property_variants_deserialize() {
    let map: Property = serde_json::from_value(json!({
        "type": "object",
        "additionalProperties": {"$ref": "http://h/s#/Pet"}
    }))
    .unwrap();
    let Property::Map(map) = map else {
        panic!("expected a map property");
    };
    assert_eq!(map.additional_properties.as_reference(), Some("http://h/s#/Pet"));

    let open: Property =
        serde_json::from_value(json!({"type": "object", "additionalProperties": true})).unwrap();
    assert!(matches!(open, Property::Other(_)));

    let array: Property =
        serde_json::from_value(json!({"type": "array", "items": {"$ref": "Pet"}})).unwrap();
    let Property::Array(array) = array else {
        panic!("expected an array property");
    };
    assert_eq!(array.items.as_reference(), Some("Pet"));

    let primitive: Property = serde_json::from_value(json!({"type": "string"})).unwrap();
    assert_eq!(primitive, Property::primitive("string"));
}

#[test]
fn parameter_variants_deserialize() {
    let body: Parameter = serde_json::from_value(json!({
        "in": "body",
        "name": "pet",
        "required": true,
        "schema": {"$ref": "http://h/s#/Pet"}
    }))
    .unwrap();
    let Parameter::Body(body) = body else {
        panic!("expected a body parameter");
    };
    assert_eq!(body.name.as_deref(), Some("pet"));
    assert_eq!(body.schema.as_reference(), Some("http://h/s#/Pet"));

    let query: Parameter =
        serde_json::from_value(json!({"in": "query", "name": "limit", "type": "integer"})).unwrap();
    assert!(matches!(query, Parameter::Other(_)));

    let reference: Parameter =
        serde_json::from_value(json!({"$ref": "#/parameters/limit"})).unwrap();
    assert_eq!(reference, Parameter::reference("#/parameters/limit"));

    let built = Parameter::body("pet", Model::reference("http://h/s#/Pet"));
    assert_eq!(
        serde_json::to_value(&built).unwrap(),
        json!({"in": "body", "name": "pet", "schema": {"$ref": "http://h/s#/Pet"}})
    );
}

#[test]
fn references_keep_sibling_keys() {
    let model_source = json!({"$ref": "#/definitions/Owner", "description": "the owner"});
    let model: Model = serde_json::from_value(model_source.clone()).unwrap();
    assert_eq!(model.as_reference(), Some("#/definitions/Owner"));
    assert_eq!(serde_json::to_value(&model).unwrap(), model_source);

    let property_source = json!({"$ref": "http://h/s#/Tag", "x-nullable": true});
    let property: Property = serde_json::from_value(property_source.clone()).unwrap();
    assert_eq!(property.as_reference(), Some("http://h/s#/Tag"));
    assert_eq!(serde_json::to_value(&property).unwrap(), property_source);

    let parameter_source = json!({"$ref": "#/parameters/limit", "description": "page size"});
    let parameter: Parameter = serde_json::from_value(parameter_source.clone()).unwrap();
    let Parameter::Reference(reference) = &parameter else {
        panic!("expected a reference parameter");
    };
    assert_eq!(reference.extra["description"], "page size");
    assert_eq!(serde_json::to_value(&parameter).unwrap(), parameter_source);
}

#[test]
fn document_preserves_unknown_keys() {
    let source = json!({
        "swagger": "2.0",
        "info": {"title": "Petstore", "version": "1.0.0"},
        "host": "petstore.example.com",
        "paths": {
            "/pets": {
                "parameters": [{"$ref": "#/parameters/common"}],
                "get": {
                    "operationId": "listPets",
                    "responses": {"200": {"description": "ok", "schema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}}}
                }
            }
        },
        "definitions": {"Pet": {"type": "object", "x-internal": true}}
    });

    let doc: Document = serde_json::from_value(source.clone()).unwrap();
    assert_eq!(doc.extra["host"], "petstore.example.com");
    let get = doc.paths["/pets"].operation(HttpMethod::Get).unwrap();
    assert_eq!(get.extra["operationId"], "listPets");

    let back = serde_json::to_value(&doc).unwrap();
    assert_eq!(back, source);
}

#[test]
fn document_parses_yaml() {
    let doc = Document::parse(
        "swagger: '2.0'\npaths:\n  /pets:\n    get:\n      responses:\n        200:\n          description: ok\n          schema:\n            $ref: 'http://h/s#/Pet'\n",
    )
    .unwrap();
    let response = &doc.paths["/pets"].get.as_ref().unwrap().responses["200"];
    assert_eq!(
        response.schema.as_ref().and_then(Property::as_reference),
        Some("http://h/s#/Pet")
    );
}

#[test]
fn path_entry_operations_follow_verb_order() {
    let mut entry = PathEntry::default();
    entry.set_operation(HttpMethod::Patch, Operation::default());
    entry.set_operation(HttpMethod::Get, Operation::default());
    entry.set_operation(HttpMethod::Post, Operation::default());

    let methods: Vec<HttpMethod> = entry.operations().into_iter().map(|(m, _)| m).collect();
    assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Patch]);
    assert!(entry.operation(HttpMethod::Delete).is_none());
}

#[test]
fn authorization_value_serializes_type_field() {
    let auth = AuthorizationValue::header("Authorization", "Bearer t");
    let value = serde_json::to_value(&auth).unwrap();
    assert_eq!(
        value,
        json!({"key_name": "Authorization", "value": "Bearer t", "type": "header"})
    );
}
