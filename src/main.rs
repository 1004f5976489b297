use httpt::error::AppResult;

fn main() -> AppResult<()> {
    httpt::entry::run()
}
