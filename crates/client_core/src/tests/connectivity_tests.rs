use super::*;
use tokio::net::TcpListener;

async fn probe_for(addr: std::net::SocketAddr) -> (Reachability, ReachabilityProbe) {
    let base = Url::parse(&format!("http://{addr}")).expect("url");
    ReachabilityProbe::for_base_url(&base, Duration::from_millis(50)).expect("probe")
}

#[tokio::test]
async fn listening_host_is_reachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let (reachability, probe) = probe_for(listener.local_addr().expect("addr")).await;

    assert!(!reachability.is_reachable());
    assert!(probe.refresh().await);
    assert!(reachability.is_reachable());
    assert!(!probe.refresh().await, "unchanged value must not notify");
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let (reachability, probe) = probe_for(addr).await;

    assert!(!probe.probe_once().await);
    assert!(!probe.refresh().await);
    assert!(!reachability.is_reachable());
}

#[tokio::test]
async fn subscribers_observe_changes_from_run_loop() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let (reachability, probe) = probe_for(listener.local_addr().expect("addr")).await;
    let mut changes = reachability.subscribe();
    let task = tokio::spawn(probe.run());

    tokio::time::timeout(Duration::from_secs(5), changes.changed())
        .await
        .expect("change within timeout")
        .expect("sender alive");
    assert!(*changes.borrow());

    task.abort();
}

#[test]
fn base_url_without_host_is_rejected() {
    let base = Url::parse("data:text/plain,hello").expect("url");
    assert!(matches!(
        ReachabilityProbe::for_base_url(&base, Duration::from_secs(1)),
        Err(ConnectivityError::MissingHost(_))
    ));
}

#[test]
fn fixed_connectivity_notifies_subscribers() {
    let connectivity = FixedConnectivity::new(false);
    let rx = connectivity.subscribe();
    assert!(!connectivity.is_reachable());

    connectivity.set(true);
    assert!(connectivity.is_reachable());
    assert!(rx.has_changed().expect("sender alive"));
}
