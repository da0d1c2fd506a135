use glucose_series::{config::Config, pipeline::Pipeline, Payload, RawEntry, RawGroup};

fn main() -> anyhow::Result<()> {
    let pipeline = Pipeline::new(Config::default())?;

    let mut payload = Payload::default();
    payload.groups.insert(
        "abbott_libreview".to_string(),
        vec![RawGroup {
            data: vec![
                RawEntry::new(Some("2024-01-01T08:00:00"), 5.5),
                RawEntry::new(Some("2024-01-01T07:30:00Z"), 4.9),
                RawEntry::new(None, 6.0),
            ],
        }],
    );

    let assembly = pipeline.assemble(&payload);
    println!("report: {:?}", assembly.report);
    for (label, value) in assembly
        .series
        .labels()
        .iter()
        .zip(assembly.series.values())
    {
        println!("{} {}", label, value);
    }

    let export = pipeline.export(&assembly.series, chrono::Utc::now().date_naive())?;
    println!("{}:", export.file_name);
    print!("{}", String::from_utf8_lossy(&export.content));
    Ok(())
}
