//! Donation action URLs.
//!
//! The donate endpoint is addressed by two query parameters, `to` and
//! `repo`; each linked action adds `amount`. A share link wraps the action
//! URL into a Blink interstitial such as `https://dial.to/`.

use crate::objects::Cluster;
use crate::solana::Pubkey;

/// Default Blink interstitial used for share links.
pub const DEFAULT_INTERSTITIAL: &str = "https://dial.to/";

/// Placeholder substituted by Blink clients with the user-entered amount.
pub const AMOUNT_TEMPLATE: &str = "{amount}";

/// Build `{endpoint}?to={to}&repo={repo}`.
///
/// `endpoint` may be a path (`/api/actions/donate`) or an absolute URL.
pub fn donate_url(endpoint: &str, to: &Pubkey, repo: &str) -> String {
    format!(
        "{endpoint}?to={}&repo={}",
        urlencoding::encode(&to.to_string()),
        urlencoding::encode(repo)
    )
}

/// Build a donate URL carrying an amount.
///
/// The amount is appended verbatim so that [`AMOUNT_TEMPLATE`] survives
/// unescaped for the client to fill in.
pub fn donate_url_with_amount(endpoint: &str, to: &Pubkey, repo: &str, amount: &str) -> String {
    format!("{}&amount={amount}", donate_url(endpoint, to, repo))
}

/// Wrap an action URL into a shareable Blink interstitial link.
///
/// ```text
/// {interstitial}?action=solana-action%3A{url-encoded action}&cluster={cluster}
/// ```
pub fn share_url(interstitial: &str, action_url: &str, cluster: Cluster) -> String {
    let action = format!("solana-action:{action_url}");
    format!(
        "{interstitial}?action={}&cluster={}",
        urlencoding::encode(&action),
        cluster.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest() -> Pubkey {
        "2grKcZPjxKbNKkc8S6nmrSXtXTXJih4utVMa7jBwRcFf".parse().unwrap()
    }

    #[test]
    fn donate_url_encodes_repo() {
        let url = donate_url(
            "/api/actions/donate",
            &dest(),
            "https://github.com/0xnetero/oss-blinks",
        );
        assert_eq!(
            url,
            "/api/actions/donate?to=2grKcZPjxKbNKkc8S6nmrSXtXTXJih4utVMa7jBwRcFf\
             &repo=https%3A%2F%2Fgithub.com%2F0xnetero%2Foss-blinks"
        );
    }

    #[test]
    fn amount_template_is_not_escaped() {
        let url = donate_url_with_amount("/d", &dest(), "r", AMOUNT_TEMPLATE);
        assert!(url.ends_with("&amount={amount}"));
    }

    #[test]
    fn share_url_wraps_action() {
        let action = donate_url("https://blinks.example/api/actions/donate", &dest(), "x");
        let share = share_url(DEFAULT_INTERSTITIAL, &action, Cluster::Devnet);
        assert!(share.starts_with("https://dial.to/?action=solana-action%3Ahttps%3A%2F%2Fblinks.example"));
        assert!(share.ends_with("&cluster=devnet"));

        let parsed = url::Url::parse(&share).unwrap();
        let action_param = parsed
            .query_pairs()
            .find(|(k, _)| k == "action")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(action_param, format!("solana-action:{action}"));
    }
}
