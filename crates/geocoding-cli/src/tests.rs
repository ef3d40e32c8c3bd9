use super::*;

#[test]
fn parses_address_command_with_country() {
    let cli = Cli::try_parse_from([
        "geocoding-cli",
        "address",
        "Les Houches",
        "--country",
        "FR",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Address { ref address, country: Some(ref c) } if address == "Les Houches" && c == "FR"
    ));
}

#[test]
fn parses_postcode_command() {
    let cli = Cli::try_parse_from(["geocoding-cli", "postcode", "07001", "ES"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Postcode { ref postcode, ref country } if postcode == "07001" && country == "ES"
    ));
}

#[test]
fn postcode_requires_country() {
    assert!(Cli::try_parse_from(["geocoding-cli", "postcode", "07001"]).is_err());
}

#[test]
fn parses_negative_longitude() {
    let cli = Cli::try_parse_from([
        "geocoding-cli",
        "latlong",
        "50.88916732998306",
        "-0.5768395884825535",
    ])
    .expect("negative numbers should parse as values");

    assert!(matches!(
        cli.command,
        Commands::Latlong { ref long, country: None, .. } if long == "-0.5768395884825535"
    ));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["geocoding-cli"]).is_err());
}
