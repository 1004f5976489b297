use super::*;

#[test]
fn parse_header_colon_form() -> Result<(), String> {
    let (key, value) = parse_header("Content-Type: application/json").map_err(|err| err.to_string())?;
    if key != "Content-Type" || value != "application/json" {
        return Err(format!("Unexpected header: {}={}", key, value));
    }
    Ok(())
}

#[test]
fn parse_header_equals_form() -> Result<(), String> {
    let (key, value) = parse_header("X-Token=a:b").map_err(|err| err.to_string())?;
    if key != "X-Token" || value != "a:b" {
        return Err(format!("Unexpected header: {}={}", key, value));
    }
    Ok(())
}

#[test]
fn parse_header_bare_key_uses_key_as_value() -> Result<(), String> {
    let (key, value) = parse_header("X-Debug").map_err(|err| err.to_string())?;
    if key != "X-Debug" || value != "X-Debug" {
        return Err(format!("Unexpected header: {}={}", key, value));
    }
    Ok(())
}

#[test]
fn parse_header_keeps_empty_value() -> Result<(), String> {
    let (key, value) = parse_header("X-Empty:").map_err(|err| err.to_string())?;
    if key != "X-Empty" || !value.is_empty() {
        return Err(format!("Unexpected header: {}={}", key, value));
    }
    Ok(())
}

#[test]
fn parse_header_rejects_empty_name() -> Result<(), String> {
    if parse_header(": value").is_ok() {
        return Err("Expected Err for empty header name".to_owned());
    }
    if parse_header("   ").is_ok() {
        return Err("Expected Err for blank header".to_owned());
    }
    Ok(())
}

#[test]
fn repeated_headers_keep_order_and_duplicates() -> Result<(), String> {
    let args = parse_test_args([
        "httpt",
        "http://localhost",
        "-H",
        "Accept: text/plain",
        "-H",
        "X-Trace=1",
        "-H",
        "Accept: application/json",
    ])
    .map_err(|err| err.to_string())?;

    let expected = vec![
        ("Accept".to_owned(), "text/plain".to_owned()),
        ("X-Trace".to_owned(), "1".to_owned()),
        ("Accept".to_owned(), "application/json".to_owned()),
    ];
    if args.headers != expected {
        return Err(format!("Unexpected headers: {:?}", args.headers));
    }
    Ok(())
}
