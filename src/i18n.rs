// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持葡萄牙语（默认）、英文、中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 3] = ["pt-BR", "en", "zh-CN"];

/// 是否为已支持的语言
pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// 按指定语言翻译消息（带参数）
///
/// 不读写全局 locale, 引擎按配置语言生成告警文案
///
/// # 示例
/// ```no_run
/// use forno_ops::i18n::t_in;
/// let msg = t_in("en", "alert.yield_below", &[("diff", "7.9")]);
/// ```
pub fn t_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key, locale = locale).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
