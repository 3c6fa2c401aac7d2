use stasm::{scan, Error, Literal, Sigil, Token};

fn tokens(source: &str) -> Vec<Token> {
    scan(source).collect::<Result<Vec<_>, _>>().unwrap()
}

fn ident(name: &str) -> Literal {
    Literal::Identifier(name.to_string())
}

#[test]
fn test_classify() {
    assert_eq!(Literal::classify("0".into()).unwrap(), Literal::Integer(0));
    assert_eq!(Literal::classify("0042".into()).unwrap(), Literal::Integer(42));
    assert_eq!(
        Literal::classify("18446744073709551615".into()).unwrap(),
        Literal::Integer(u64::MAX)
    );
    for raw in ["", "-1", "12a", "a12", "1 ", " 1", "+", "1.5", "\u{0663}"] {
        assert_eq!(Literal::classify(raw.into()).unwrap(), ident(raw));
    }
    assert!(matches!(
        Literal::classify("18446744073709551616".into()),
        Err(Error::IntegerOutOfRange(digits)) if digits == "18446744073709551616"
    ));
}

#[test]
fn test_values() {
    assert_eq!(
        tokens("5 foo == $3 @0 ?2 :1 :loop #byte .text $msg"),
        vec![
            Token::value(None, 5u64),
            Token::value(None, "foo"),
            Token::value(None, "=="),
            Token::value(Some(Sigil::Dollar), 3u64),
            Token::value(Some(Sigil::At), 0u64),
            Token::value(Some(Sigil::Question), 2u64),
            Token::value(Some(Sigil::Colon), 1u64),
            Token::value(Some(Sigil::Colon), "loop"),
            Token::value(Some(Sigil::Hash), "byte"),
            Token::value(Some(Sigil::Dot), "text"),
            Token::value(Some(Sigil::Dollar), "msg"),
        ]
    );
}

#[test]
fn test_only_one_sigil() {
    assert_eq!(
        tokens("..text $$1"),
        vec![
            Token::value(Some(Sigil::Dot), ".text"),
            Token::value(Some(Sigil::Dollar), "$1"),
        ]
    );
}

#[test]
fn test_lone_sigil() {
    assert_eq!(tokens("$"), vec![Token::value(Some(Sigil::Dollar), "")]);
}

#[test]
fn test_comments_and_whitespace() {
    let source = "; leading comment\n\t1 ; trailing comment\r\n  2 ;no space\n;last line without newline";
    assert_eq!(tokens(source), vec![Token::value(None, 1u64), Token::value(None, 2u64)]);
    assert!(tokens("   \n\t ; nothing here").is_empty());
    assert!(tokens("").is_empty());
}

#[test]
fn test_value_runs_over_quotes_and_semicolons() {
    assert_eq!(
        tokens("a;b c\"d"),
        vec![Token::value(None, "a;b"), Token::value(None, "c\"d")]
    );
}

#[test]
fn test_strings() {
    assert_eq!(
        tokens("\"hello world\" \"\" \"a ; not a comment\nb\""),
        vec![
            Token::Str("hello world".into()),
            Token::Str("".into()),
            Token::Str("a ; not a comment\nb".into()),
        ]
    );
    // No escapes: a backslash is just a character.
    assert_eq!(tokens(r#""a\""#), vec![Token::Str("a\\".into())]);
}

#[test]
fn test_string_ends_a_bare_token_only_at_whitespace() {
    assert_eq!(
        tokens("1\"x\""),
        vec![Token::value(None, "1\"x\"")]
    );
    assert_eq!(
        tokens("\"x\"1"),
        vec![Token::Str("x".into()), Token::value(None, 1u64)]
    );
}

#[test]
fn test_calls() {
    assert_eq!(
        tokens("call(foo, 2) return() global(_start)"),
        vec![
            Token::call("call", [ident("foo"), Literal::Integer(2)]),
            Token::call("return", []),
            Token::call("global", [ident("_start")]),
        ]
    );
}

#[test]
fn test_call_arguments() {
    // Leading whitespace is skipped, everything else is kept.
    assert_eq!(
        tokens("f(  a b ,\n 2 , 3)"),
        vec![Token::call(
            "f",
            [ident("a b "), ident("2 "), Literal::Integer(3)]
        )]
    );
    assert_eq!(tokens("f(a,)"), vec![Token::call("f", [ident("a")])]);
    assert_eq!(tokens("f(,)"), vec![Token::call("f", [ident("")])]);
    assert_eq!(tokens("f( )"), vec![Token::call("f", [])]);
    assert_eq!(
        tokens("f(;x, \"y)"),
        vec![Token::call("f", [ident(";x"), ident("\"y")])]
    );
}

#[test]
fn test_call_followed_by_tokens() {
    assert_eq!(
        tokens("jmp(top)1 2"),
        vec![
            Token::call("jmp", [ident("top")]),
            Token::value(None, 1u64),
            Token::value(None, 2u64),
        ]
    );
}

#[test]
fn test_unterminated_string() {
    let mut scanner = scan("1 \"abc");
    assert_eq!(scanner.next().unwrap().unwrap(), Token::value(None, 1u64));
    assert!(matches!(
        scanner.next(),
        Some(Err(Error::UnterminatedString(text))) if text == "abc"
    ));
    assert!(scanner.next().is_none());
}

#[test]
fn test_prefixed_function() {
    assert!(matches!(
        scan("$foo(1)").next(),
        Some(Err(Error::PrefixedFunction(Sigil::Dollar, name))) if name == "foo"
    ));
    assert!(matches!(
        scan(":f()").next(),
        Some(Err(Error::PrefixedFunction(Sigil::Colon, _)))
    ));
}

#[test]
fn test_unterminated_function() {
    for source in ["f(", "f(1, 2", "f(1,", "f(  "] {
        assert!(matches!(
            scan(source).next(),
            Some(Err(Error::UnterminatedFunction(name))) if name == "f"
        ));
    }
}

#[test]
fn test_scanning_is_lazy() {
    // Tokens before a malformed one are produced before the error.
    let results: Vec<_> = scan("1 2 f(").collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok() && results[1].is_ok());
    assert!(matches!(results[2], Err(Error::UnterminatedFunction(_))));
}

#[test]
fn test_display_round_trip_form() {
    assert_eq!(Token::value(Some(Sigil::Hash), "byte").to_string(), "#byte");
    assert_eq!(
        Token::call("data", [ident("byte"), Literal::Integer(1), Literal::Integer(2)]).to_string(),
        "data(byte, 1, 2)"
    );
    assert_eq!(Token::Str("hi".into()).to_string(), "\"hi\"");
}
