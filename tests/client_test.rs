mod common;

use bra_ingest::runtime::client::{DpbraClient, ImageKind};
use common::{load_fixture, MockFetcher};

fn client_with(fetcher: MockFetcher) -> DpbraClient {
    DpbraClient::new("https://api.test", Box::new(fetcher))
}

#[tokio::test]
async fn fetches_and_parses_bulletin() {
    let fetcher = MockFetcher::new();
    fetcher.add_response(
        "https://api.test/massif/BRA?id-massif=72&format=xml",
        &load_fixture("sample_bulletin.xml"),
    );

    let bulletin = client_with(fetcher)
        .bulletin("72")
        .await
        .expect("bulletin should parse");

    assert_eq!(bulletin.id, "72");
    assert_eq!(bulletin.massif, "Orlu St-Barthelemy");
    assert_eq!(bulletin.risque.risque_max, "3");
}

#[tokio::test]
async fn fetches_and_groups_massif_list() {
    let fetcher = MockFetcher::new();
    fetcher.add_response(
        "https://api.test/liste-massifs",
        &load_fixture("liste_massifs.json"),
    );

    let index = client_with(fetcher)
        .massifs()
        .await
        .expect("massif list should parse");

    assert_eq!(index["74"].len(), 2);
    assert_eq!(index["09"][0].code, "72");
}

#[tokio::test]
async fn builds_image_urls_per_kind() {
    let fetcher = MockFetcher::new();
    fetcher.add_response(
        "https://api.test/massif/image/rose-pentes?id-massif=72",
        "PNGDATA",
    );

    let bytes = client_with(fetcher)
        .image(ImageKind::RosePentes, "72")
        .await
        .expect("image should fetch");

    assert_eq!(bytes, b"PNGDATA");
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let fetcher = MockFetcher::new();
    fetcher.add_response(
        "https://api.test/liste-massifs",
        &load_fixture("liste_massifs.json"),
    );
    let client = DpbraClient::new("https://api.test/", Box::new(fetcher));

    assert!(client.massifs().await.is_ok());
}

#[tokio::test]
async fn massif_ids_are_url_encoded() {
    let fetcher = MockFetcher::new();
    fetcher.add_response(
        "https://api.test/massif/BRA?id-massif=72%2F1&format=xml",
        "<BULLETINS_NEIGE_AVALANCHE/>",
    );

    let bulletin = client_with(fetcher)
        .bulletin("72/1")
        .await
        .expect("bulletin should parse");
    assert_eq!(bulletin.id, "");
}

#[tokio::test]
async fn fetch_errors_are_propagated() {
    let err = client_with(MockFetcher::new())
        .bulletin("72")
        .await
        .unwrap_err();
    assert!(err.contains("No canned response"));
}
