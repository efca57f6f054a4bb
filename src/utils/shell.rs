//! # Shell 工具
//!
//! 参数引用、PATH 查找以及提交命令的回显。
//!
//! ## 依赖关系
//! - 被 `engine/` 和 `models/request.rs` 使用
//! - 无外部 crate 依赖

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Command;

/// 不需要引号的字符
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-_./=:,+@%^".contains(c)
}

/// POSIX shell 单引号引用
pub fn quote(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(is_safe) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// 引用并以空格连接
pub fn join<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| quote(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 在 PATH 中查找可执行文件
pub fn which(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// 当前用户的登录 shell
pub fn login_shell() -> String {
    env::var("SHELL").unwrap_or_else(|_| "/bin/bash".to_string())
}

/// 回显即将执行的命令（`$ prog arg ...`）
pub fn echo_command(out: &mut dyn Write, cmd: &Command) -> io::Result<()> {
    let mut line = quote(&cmd.get_program().to_string_lossy());
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&quote(&arg.to_string_lossy()));
    }
    writeln!(out, "$ {}", line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("run.sh"), "run.sh");
        assert_eq!(quote("--mem=1G"), "--mem=1G");
    }

    #[test]
    fn test_quote_special() {
        assert_eq!(quote(""), "''");
        assert_eq!(quote("a b"), "'a b'");
        assert_eq!(quote("it's"), r"'it'\''s'");
        assert_eq!(quote("$HOME"), "'$HOME'");
    }

    #[test]
    fn test_echo_command() {
        let mut cmd = Command::new("sbatch");
        cmd.args(["-J", "my job"]);
        let mut buf = Vec::new();
        echo_command(&mut buf, &cmd).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "$ sbatch -J 'my job'\n");
    }
}
