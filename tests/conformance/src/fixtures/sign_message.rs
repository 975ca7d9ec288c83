//! `signMessage` across coins, address types and message lengths

use crate::selector::{CaseNaming, Suite, SubtestFixture};
use types::{ExpectedResponse, HdPath, PayloadError, RequestPayload, SignMessage};

const EXAMPLE_MESSAGE: &str = "This is an example of a signed message.";

pub fn suite() -> Suite {
    Suite::new("SignMessage", CaseNaming::SpecName)
        .subtest("sign", sign)
        .subtest("signTestnet", sign_testnet)
        .subtest("signBch", sign_bch)
        .subtest("signLong", sign_long)
}

fn single(
    coin: &str,
    path: HdPath,
    message: String,
    expected: ExpectedResponse,
    spec_name: &str,
) -> SubtestFixture {
    SubtestFixture {
        test_payloads: vec![RequestPayload::SignMessage(SignMessage {
            coin: coin.to_string(),
            path,
            message,
        })],
        expected_responses: vec![expected],
        spec_name: spec_name.to_string(),
    }
}

fn sign() -> Result<SubtestFixture, PayloadError> {
    Ok(single(
        "Bitcoin",
        HdPath::from([0]),
        EXAMPLE_MESSAGE.to_string(),
        ExpectedResponse::message_signature(
            "14LmW5k4ssUrtbAB4255zdqv3b4w1TuX9e",
            "209e23edf0e4e47ff1dec27f32cd78c50e74ef018ee8a6adf35ae17c7a9b0dd96f48b493fd7dbab03efb6f439c6383c9523b3bbc5f1a7d158a6af90ab154e9be80",
        ),
        "/sign",
    ))
}

fn sign_testnet() -> Result<SubtestFixture, PayloadError> {
    Ok(single(
        "Testnet",
        HdPath::parse("m/49'/1'/0'")?,
        EXAMPLE_MESSAGE.to_string(),
        ExpectedResponse::message_signature(
            "2MtXohfW9QA4VhD1zxViEt7ETNc2NuTDPVA",
            "23fbc8e26c957149bcb884edd531cab9182bf79b52235c2f7a3b69ffe751ee92be22219ff576ca00406e3717dc97f3917a2ad633bfd8f088dfc8b9abd0a3311556",
        ),
        "/testnet",
    ))
}

fn sign_bch() -> Result<SubtestFixture, PayloadError> {
    Ok(single(
        "Bcash",
        HdPath::parse("m/44'/145'/0'")?,
        EXAMPLE_MESSAGE.to_string(),
        ExpectedResponse::message_signature(
            "bitcoincash:qzhsxlrst79yl6cn9fxahfl6amjn95fufcvsuqscme",
            "206c6379b33a93d220c232bc8d5d0f9dab8e89e396ebd687a0c40657060b9d553e2397612ea1df6e8aa8ec04ec5e5496c408e282ffd05b42b21da37d819e3720da",
        ),
        "/bch",
    ))
}

fn sign_long() -> Result<SubtestFixture, PayloadError> {
    Ok(single(
        "Bitcoin",
        HdPath::from([0]),
        "VeryLongMessage!".repeat(64),
        ExpectedResponse::message_signature(
            "14LmW5k4ssUrtbAB4255zdqv3b4w1TuX9e",
            "205ff795c29aef7538f8b3bdb2e8add0d0722ad630a140b6aefd504a5a895cbd867cbb00981afc50edd0398211e8d7c304bb8efa461181bc0afa67ea4a720a89ed",
        ),
        "/long",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_message_length() {
        let fixture = sign_long().unwrap();
        match &fixture.test_payloads[0] {
            RequestPayload::SignMessage(request) => assert_eq!(request.message.len(), 1024),
            other => panic!("unexpected request {}", other),
        }
    }
}
