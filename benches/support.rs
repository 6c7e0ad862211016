//! Shared helpers for benchmarks

/// A psql script of roughly `statements * 4` lines mixing every token class
#[allow(dead_code)]
pub fn sample_script(statements: usize) -> String {
    let mut script = String::new();
    for i in 0..statements {
        script.push_str(&format!(
            "-- statement {i}\nselect a.id, count(*) as total, 'x''y'\n  from accounts a\n where (a.balance + {i}.5e2) > (select avg(b) from {{t}});\n"
        ));
        if i % 50 == 0 {
            script.push_str("\\set ON_ERROR_STOP on\n");
        }
    }
    script
}
