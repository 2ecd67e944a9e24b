/// Source generators for benchmarks and large-scale tests.
use std::fmt::Write;

/// Generate a Python module with `count` undocumented functions and one
/// class per ten functions, each function `lines_per_fn` lines long.
#[allow(dead_code)]
pub fn generate_python_module(count: usize, lines_per_fn: usize) -> String {
    let mut source = String::from("import os\n\n\n");
    let body_lines = lines_per_fn.saturating_sub(2);

    for i in 0..count {
        if i % 10 == 0 {
            writeln!(source, "class Service{i}:").unwrap();
            writeln!(source, "    timeout: float = 1.0\n").unwrap();
            writeln!(source, "    def __init__(self, name: str):").unwrap();
            writeln!(source, "        self.name = name\n\n").unwrap();
        }
        writeln!(source, "def func_{i}(arg: str, retries: int = 3) -> str:").unwrap();
        for j in 0..body_lines {
            writeln!(source, "    val_{j} = arg + \"{j}\"").unwrap();
        }
        writeln!(source, "    if not arg:\n        raise ValueError(arg)").unwrap();
        writeln!(source, "    return os.path.join(arg, str(retries))\n\n").unwrap();
    }
    source
}
