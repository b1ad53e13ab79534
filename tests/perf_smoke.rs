use gravitas_engine::EngineCore;

#[test]
fn perf_smoke_step() {
    let mut engine = EngineCore::new(512.0, 512.0, 500);
    engine.enable_perf_metrics(true);
    engine.step_dt(0.1);
    let stats = engine.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.body_count(), 500);
    assert!(stats.tree_nodes() > 0);
}
