use scan_analytics::ScanRecord;

/// Sample history shown on a fresh dashboard, newest first.
pub fn sample_history() -> Vec<ScanRecord> {
    let rows: [(&str, &str, i64, &str, bool, u64, u64, &str); 7] = [
        ("01:45:01 AM", "0xA33dec23927cEAcbd14Dd9Fa9754Aa275723D6F1", 5, "Ethereum", true, 450, 12, "0.8.20"),
        ("01:43:59 AM", "0x71d865673E6c2E112CdED381b38f7A958eA22d39", 8, "Polygon", true, 620, 18, "0.8.19"),
        ("01:43:04 AM", "0xE789e109B2C97AA039bfBD42892B742bc2955555", 3, "BSC", true, 320, 8, "0.8.18"),
        ("01:42:58 AM", "0xE789e109B2C97AA039bfBD42892B742bc2955555", 2, "Arbitrum", false, 280, 7, "0.8.17"),
        ("01:42:07 AM", "0xeACCAe297e72959360205761101D8541cbe96b100", 10, "Ethereum", true, 890, 25, "0.8.20"),
        ("01:40:35 AM", "0x831D3748f476667397129AbE057050249579792e512", 6, "Polygon", true, 540, 15, "0.8.19"),
        ("01:38:50 AM", "0x94bE2665a31F0E6caBCb9487f1A0Da7766cdfA299", 4, "BSC", true, 410, 11, "0.8.18"),
    ];

    rows.iter()
        .map(|&(time, target, vulns, network, succeeded, lines, functions, compiler)| ScanRecord {
            date_label: "Oct 15, 2025".to_string(),
            time_label: time.to_string(),
            duration_label: "1.20s".to_string(),
            succeeded,
            lines_of_code: Some(lines),
            functions_analyzed: Some(functions),
            compiler_version: Some(compiler.to_string()),
            ..ScanRecord::new(target, network, vulns)
        })
        .collect()
}
